//! Authentication endpoints.
//!
//! ```text
//! POST /api/v1/auth/login        Staff login
//! POST /api/v1/auth/guest-login  Guest login with room number
//! GET  /api/v1/auth/me           Describe the authenticated actor
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::auth::Actor;
use crate::domain::room::RoomNumber;
use crate::domain::{DomainError, LoginCredentials, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Staff login request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Staff login name.
    #[schema(example = "fdesk.ada")]
    pub username: String,
    /// Plaintext password, verified against the stored hash.
    pub password: String,
}

/// Guest login request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestLoginRequest {
    /// Room number printed on the credential slip.
    #[schema(example = "204")]
    pub room_number: String,
    /// Guest login name generated at check-in.
    #[schema(example = "guest-204")]
    pub username: String,
    /// One-time password generated at check-in.
    pub password: String,
}

/// Issued bearer token response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed bearer token.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
    /// Always `Bearer`.
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(token: String, expires_in: u64) -> Self {
        Self {
            token,
            expires_in,
            token_type: "Bearer".to_owned(),
        }
    }
}

/// Description of the authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// `staff` or `guest`.
    pub kind: String,
    /// Account identifier.
    pub id: Uuid,
    /// Role scope, staff only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<RoleScope>,
    /// Room of the current stay, guests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<Uuid>,
}

impl From<Actor> for MeResponse {
    fn from(actor: Actor) -> Self {
        match actor {
            Actor::Staff { id, scope } => Self {
                kind: "staff".to_owned(),
                id,
                scope: Some(scope),
                room_id: None,
            },
            Actor::Guest { id, room_id } => Self {
                kind: "guest".to_owned(),
                id,
                scope: None,
                room_id: Some(room_id),
            },
        }
    }
}

fn credentials(username: &str, password: &str) -> Result<LoginCredentials, ApiError> {
    LoginCredentials::try_from_parts(username, password)
        .map_err(|err| DomainError::invalid_request(err.to_string()).into())
}

/// Authenticate a staff member.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "staffLogin"
)]
#[post("/auth/login")]
pub async fn staff_login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials(&payload.username, &payload.password)?;
    let issued = state.auth.staff_login(&credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(issued.token, issued.expires_in)))
}

/// Authenticate a checked-in guest.
#[utoipa::path(
    post,
    path = "/api/v1/auth/guest-login",
    request_body = GuestLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "guestLogin"
)]
#[post("/auth/guest-login")]
pub async fn guest_login(
    state: web::Data<HttpState>,
    payload: web::Json<GuestLoginRequest>,
) -> ApiResult<HttpResponse> {
    let room_number = RoomNumber::new(payload.room_number.clone())
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let credentials = credentials(&payload.username, &payload.password)?;
    let issued = state.auth.guest_login(&room_number, &credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(issued.token, issued.expires_in)))
}

/// Describe the actor behind the presented token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated actor", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["auth"],
    operation_id = "whoAmI"
)]
#[get("/auth/me")]
pub async fn me(auth: AuthContext) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MeResponse::from(auth.actor())))
}
