//! Role administration endpoints.
//!
//! ```text
//! GET    /api/v1/roles                  List roles
//! POST   /api/v1/roles                  Create a role
//! PUT    /api/v1/roles/{id}             Rename or rescope
//! DELETE /api/v1/roles/{id}             Delete an unassigned role
//! PUT    /api/v1/roles/{id}/assignment  Assign to or withdraw from a staff member
//! ```
//!
//! A role is held by at most one staff member at a time; assignment moves
//! it explicitly rather than silently reassigning.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, Role, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Role creation/update request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    /// Unique role name.
    #[schema(example = "Front Desk Lead")]
    pub name: String,
    /// Authorization scope the role grants.
    pub scope: RoleScope,
}

/// Assignment request body; `staffId: null` withdraws the role.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentRequest {
    /// Staff member to hold the role, or null to leave it unassigned.
    pub staff_id: Option<Uuid>,
}

/// List roles.
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses(
        (status = 200, description = "Roles", body = [Role]),
        (status = 403, description = "Insufficient permissions", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["roles"],
    operation_id = "listRoles"
)]
#[get("/roles")]
pub async fn list_roles(state: web::Data<HttpState>, auth: AuthContext) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    let roles = state.roles.list().await.map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(roles))
}

/// Create a role.
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 409, description = "Name already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["roles"],
    operation_id = "createRole"
)]
#[post("/roles")]
pub async fn create_role(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<RoleRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_request("role name must not be empty").into());
    }
    if state
        .roles
        .find_by_name(name)
        .await
        .map_err(DomainError::from)?
        .is_some()
    {
        return Err(DomainError::conflict("role name already in use")
            .with_details(json!({ "name": name }))
            .into());
    }
    let role = Role::new(name, payload.scope);
    state.roles.create(&role).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Created().json(role))
}

/// Update a role's name and scope.
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role identifier")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 404, description = "Unknown role", body = ApiError),
        (status = 409, description = "Name already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["roles"],
    operation_id = "updateRole"
)]
#[put("/roles/{id}")]
pub async fn update_role(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_request("role name must not be empty").into());
    }
    let mut role = state
        .roles
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("role not found"))?;
    if let Some(existing) = state
        .roles
        .find_by_name(name)
        .await
        .map_err(DomainError::from)?
        && existing.id != *id
    {
        return Err(DomainError::conflict("role name already in use")
            .with_details(json!({ "name": name }))
            .into());
    }
    role.name = name.to_owned();
    role.scope = payload.scope;
    state.roles.update(&role).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(role))
}

/// Delete a role nobody holds.
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role identifier")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Unknown role", body = ApiError),
        (status = 409, description = "Role is still assigned", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["roles"],
    operation_id = "deleteRole"
)]
#[delete("/roles/{id}")]
pub async fn delete_role(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    state
        .roles
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("role not found"))?;
    if let Some(holder) = state
        .staff
        .find_by_role(*id)
        .await
        .map_err(DomainError::from)?
    {
        return Err(DomainError::conflict("role is still assigned")
            .with_details(json!({ "staffId": holder.id }))
            .into());
    }
    state.roles.delete(*id).await.map_err(DomainError::from)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Assign a role to a staff member, or withdraw it.
///
/// Assigning a role already held by someone else is a conflict; withdraw
/// it first. Assigning to its current holder is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}/assignment",
    params(("id" = Uuid, Path, description = "Role identifier")),
    request_body = RoleAssignmentRequest,
    responses(
        (status = 204, description = "Assignment updated"),
        (status = 400, description = "Unknown staff member", body = ApiError),
        (status = 404, description = "Unknown role", body = ApiError),
        (status = 409, description = "Role held by another staff member", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["roles"],
    operation_id = "assignRole"
)]
#[put("/roles/{id}/assignment")]
pub async fn assign_role(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<RoleAssignmentRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    state
        .roles
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("role not found"))?;
    let holder = state
        .staff
        .find_by_role(*id)
        .await
        .map_err(DomainError::from)?;

    match payload.staff_id {
        Some(staff_id) => {
            state
                .staff
                .find_by_id(staff_id)
                .await
                .map_err(DomainError::from)?
                .ok_or_else(|| DomainError::invalid_request("unknown staff member"))?;
            if let Some(holder) = holder {
                if holder.id == staff_id {
                    return Ok(HttpResponse::NoContent().finish());
                }
                return Err(DomainError::conflict("role is held by another staff member")
                    .with_details(json!({ "staffId": holder.id }))
                    .into());
            }
            state
                .staff
                .set_role(staff_id, Some(*id))
                .await
                .map_err(DomainError::from)?;
        }
        None => {
            if let Some(holder) = holder {
                state
                    .staff
                    .set_role(holder.id, None)
                    .await
                    .map_err(DomainError::from)?;
            }
        }
    }
    Ok(HttpResponse::NoContent().finish())
}
