//! Room and room-type endpoints.
//!
//! ```text
//! GET    /api/v1/rooms                   List rooms
//! POST   /api/v1/rooms                   Create a room
//! GET    /api/v1/rooms/{id}              Fetch a room
//! PUT    /api/v1/rooms/{id}              Update number and type
//! DELETE /api/v1/rooms/{id}              Delete a room without an active stay
//! POST   /api/v1/rooms/{id}/select       Earmark for an incoming guest
//! POST   /api/v1/rooms/{id}/check-in     Open a stay and provision the guest
//! POST   /api/v1/rooms/{id}/check-out    Close the active stay
//! POST   /api/v1/rooms/{id}/maintenance  Withdraw from service
//! POST   /api/v1/rooms/{id}/ready        Return to service
//! GET    /api/v1/room-types              List room types
//! POST   /api/v1/room-types              Create a room type
//! ```
//!
//! All room operations require a front-desk, manager, or admin token.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::room::{Room, RoomNumber, RoomStatus, RoomType};
use crate::domain::{CheckInOutcome, DomainError, RoleScope, Stay};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Scopes allowed to operate rooms.
const ROOM_SCOPES: &[RoleScope] = &[RoleScope::Admin, RoleScope::Manager, RoleScope::FrontDesk];

/// Room creation/update request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    /// Unique room number.
    #[schema(example = "204")]
    pub number: String,
    /// Existing room type identifier.
    pub room_type_id: Uuid,
}

/// Room listing filter.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    /// Restrict to rooms in this status.
    pub status: Option<RoomStatus>,
}

/// Check-in request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    /// Guest's full name for the stay record.
    #[schema(example = "Ada Lovelace")]
    pub guest_name: String,
    /// Date the guest is expected to leave.
    pub expected_checkout: NaiveDate,
}

/// Check-in response: the stay plus one-time guest credentials.
///
/// The plaintext password is returned here once and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    /// The opened stay.
    pub stay: Stay,
    /// Generated guest login name.
    #[schema(example = "guest-204")]
    pub guest_username: String,
    /// Generated one-time password.
    pub guest_password: String,
}

impl From<CheckInOutcome> for CheckInResponse {
    fn from(outcome: CheckInOutcome) -> Self {
        Self {
            stay: outcome.stay,
            guest_username: outcome.credentials.username,
            guest_password: outcome.credentials.password,
        }
    }
}

/// Room type creation request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRequest {
    /// Unique type name.
    #[schema(example = "double")]
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

fn parse_number(raw: &str) -> Result<RoomNumber, ApiError> {
    RoomNumber::new(raw).map_err(|err| DomainError::invalid_request(err.to_string()).into())
}

/// List rooms.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(RoomListQuery),
    responses(
        (status = 200, description = "Rooms", body = [Room]),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 403, description = "Insufficient permissions", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    auth: AuthContext,
    query: web::Query<RoomListQuery>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let rooms = state.rooms.list(query.status).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// Fetch a single room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = Room),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let room = state.rooms.get(*id).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Create a room.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Invalid number or unknown type", body = ApiError),
        (status = 409, description = "Room number already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<RoomRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let number = parse_number(&payload.number)?;
    let room = state.rooms.create_room(number, payload.room_type_id).await?;
    Ok(HttpResponse::Created().json(room))
}

/// Update a room's number and type.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 404, description = "Unknown room", body = ApiError),
        (status = 409, description = "Room number already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let number = parse_number(&payload.number)?;
    let room = state
        .rooms
        .update_room(*id, number, payload.room_type_id)
        .await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Delete a room with no active stay.
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Unknown room", body = ApiError),
        (status = 409, description = "Room has an active stay", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "deleteRoom"
)]
#[delete("/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    state.rooms.delete_room(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Earmark an available room for an incoming guest.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/select",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room selected", body = Room),
        (status = 400, description = "Illegal status transition", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "selectRoom"
)]
#[post("/rooms/{id}/select")]
pub async fn select_room(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let room = state.rooms.select_room(*id).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Check a guest into a selected room.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/check-in",
    params(("id" = Uuid, Path, description = "Room identifier")),
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Stay opened", body = CheckInResponse),
        (status = 400, description = "Room not selected or invalid guest name", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError),
        (status = 409, description = "Room already has an active stay", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "checkIn"
)]
#[post("/rooms/{id}/check-in")]
pub async fn check_in(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<CheckInRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let outcome = state
        .rooms
        .check_in(*id, &payload.guest_name, payload.expected_checkout)
        .await?;
    Ok(HttpResponse::Created().json(CheckInResponse::from(outcome)))
}

/// Close the active stay for a room.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/check-out",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Stay closed", body = Stay),
        (status = 404, description = "Unknown room or no active stay", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "checkOut"
)]
#[post("/rooms/{id}/check-out")]
pub async fn check_out(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let stay = state.rooms.check_out(*id).await?;
    Ok(HttpResponse::Ok().json(stay))
}

/// Withdraw a room from service.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/maintenance",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room under maintenance", body = Room),
        (status = 400, description = "Illegal status transition", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "setRoomMaintenance"
)]
#[post("/rooms/{id}/maintenance")]
pub async fn set_maintenance(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let room = state.rooms.set_maintenance(*id).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// Return a room under maintenance to service.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/ready",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room available", body = Room),
        (status = 400, description = "Illegal status transition", body = ApiError),
        (status = 404, description = "Unknown room", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "setRoomReady"
)]
#[post("/rooms/{id}/ready")]
pub async fn set_ready(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let room = state.rooms.set_ready(*id).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// List room types.
#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    responses(
        (status = 200, description = "Room types", body = [RoomType]),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "listRoomTypes"
)]
#[get("/room-types")]
pub async fn list_room_types(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ROOM_SCOPES)?;
    let types = state.rooms.list_types().await?;
    Ok(HttpResponse::Ok().json(types))
}

/// Create a room type.
#[utoipa::path(
    post,
    path = "/api/v1/room-types",
    request_body = RoomTypeRequest,
    responses(
        (status = 201, description = "Room type created", body = RoomType),
        (status = 409, description = "Type name already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["rooms"],
    operation_id = "createRoomType"
)]
#[post("/room-types")]
pub async fn create_room_type(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<RoomTypeRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin, RoleScope::Manager])?;
    let room_type = state
        .rooms
        .create_type(&payload.name, payload.description.clone())
        .await?;
    Ok(HttpResponse::Created().json(room_type))
}
