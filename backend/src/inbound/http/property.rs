//! Property branding endpoints.
//!
//! ```text
//! GET /api/v1/property  Public branding record
//! PUT /api/v1/property  Replace the branding record (admin)
//! ```
//!
//! The GET endpoint is unauthenticated so login screens can brand
//! themselves before any token exists.

use actix_web::{HttpResponse, get, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, Property, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Branding update request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    /// Display name of the property.
    #[schema(example = "Grand Budapest")]
    pub name: String,
    /// URL of the property logo.
    pub logo_url: Option<String>,
    /// Public contact email.
    pub contact_email: Option<String>,
    /// Public contact phone number.
    pub contact_phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

/// Fetch the branding record.
#[utoipa::path(
    get,
    path = "/api/v1/property",
    responses(
        (status = 200, description = "Branding record", body = Property),
        (status = 404, description = "Branding not configured", body = ApiError)
    ),
    tags = ["property"],
    operation_id = "getProperty"
)]
#[get("/property")]
pub async fn get_property(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let property = state
        .property
        .get()
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("property branding not configured"))?;
    Ok(HttpResponse::Ok().json(property))
}

/// Replace the branding record.
#[utoipa::path(
    put,
    path = "/api/v1/property",
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Branding updated", body = Property),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Insufficient permissions", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["property"],
    operation_id = "updateProperty"
)]
#[put("/property")]
pub async fn update_property(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<PropertyRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin])?;
    let payload = payload.into_inner();
    if payload.name.trim().is_empty() {
        return Err(DomainError::invalid_request("property name must not be empty").into());
    }
    let property = Property {
        name: payload.name,
        logo_url: payload.logo_url,
        contact_email: payload.contact_email,
        contact_phone: payload.contact_phone,
        address: payload.address,
        updated_at: Utc::now(),
    };
    state
        .property
        .upsert(&property)
        .await
        .map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(property))
}
