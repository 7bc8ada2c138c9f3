//! Department administration endpoints.
//!
//! ```text
//! GET    /api/v1/departments       List departments
//! POST   /api/v1/departments       Create a department
//! PUT    /api/v1/departments/{id}  Rename or redescribe
//! DELETE /api/v1/departments/{id}  Delete when no issue references it
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Department, DomainError, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

const ADMIN_SCOPES: &[RoleScope] = &[RoleScope::Admin, RoleScope::Manager];

/// Department creation/update request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    /// Unique department name.
    #[schema(example = "Housekeeping")]
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

fn validated_name(raw: &str) -> Result<&str, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_request(
            "department name must not be empty",
        ));
    }
    Ok(name)
}

/// List departments.
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Departments", body = [Department]),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["departments"],
    operation_id = "listDepartments"
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
    _auth: AuthContext,
) -> ApiResult<HttpResponse> {
    let departments = state.departments.list().await.map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(departments))
}

/// Create a department.
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 409, description = "Name already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/departments")]
pub async fn create_department(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ADMIN_SCOPES)?;
    let name = validated_name(&payload.name)?;
    if state
        .departments
        .find_by_name(name)
        .await
        .map_err(DomainError::from)?
        .is_some()
    {
        return Err(DomainError::conflict("department name already in use")
            .with_details(json!({ "name": name }))
            .into());
    }
    let department = Department::new(name, payload.description.clone());
    state
        .departments
        .create(&department)
        .await
        .map_err(DomainError::from)?;
    Ok(HttpResponse::Created().json(department))
}

/// Update a department.
#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    params(("id" = Uuid, Path, description = "Department identifier")),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 404, description = "Unknown department", body = ApiError),
        (status = 409, description = "Name already in use", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["departments"],
    operation_id = "updateDepartment"
)]
#[put("/departments/{id}")]
pub async fn update_department(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ADMIN_SCOPES)?;
    let name = validated_name(&payload.name)?;
    let mut department = state
        .departments
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("department not found"))?;
    if let Some(existing) = state
        .departments
        .find_by_name(name)
        .await
        .map_err(DomainError::from)?
        && existing.id != *id
    {
        return Err(DomainError::conflict("department name already in use")
            .with_details(json!({ "name": name }))
            .into());
    }
    department.name = name.to_owned();
    department.description = payload.description.clone();
    state
        .departments
        .update(&department)
        .await
        .map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(department))
}

/// Delete a department no issue references.
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{id}",
    params(("id" = Uuid, Path, description = "Department identifier")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Unknown department", body = ApiError),
        (status = 409, description = "Issues still reference this department", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[delete("/departments/{id}")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(ADMIN_SCOPES)?;
    state
        .departments
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("department not found"))?;
    if state
        .issue_records
        .any_for_department(*id)
        .await
        .map_err(DomainError::from)?
    {
        return Err(DomainError::conflict(
            "department is referenced by existing issues",
        )
        .into());
    }
    state
        .departments
        .delete(*id)
        .await
        .map_err(DomainError::from)?;
    Ok(HttpResponse::NoContent().finish())
}
