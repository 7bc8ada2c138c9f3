//! Stay endpoints and the scheduled checkout hook.
//!
//! ```text
//! GET  /api/v1/stays                List stays
//! GET  /api/v1/stays/{id}           Fetch a stay
//! POST /api/v1/stays/auto-checkout  Close overdue stays (scheduler hook)
//! ```
//!
//! The auto-checkout endpoint authenticates with a shared scheduler token
//! instead of a bearer token so it can run unattended.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::stay::{Stay, StayStatus};
use crate::domain::{AutoCheckoutReport, DomainError, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Header carrying the shared scheduler token.
pub const CRON_TOKEN_HEADER: &str = "X-Cron-Token";

const STAY_SCOPES: &[RoleScope] = &[RoleScope::Admin, RoleScope::Manager, RoleScope::FrontDesk];

/// Stay listing filter.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StayListQuery {
    /// Restrict to stays in this status.
    pub status: Option<StayStatus>,
}

/// List stays, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/stays",
    params(StayListQuery),
    responses(
        (status = 200, description = "Stays", body = [Stay]),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 403, description = "Insufficient permissions", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["stays"],
    operation_id = "listStays"
)]
#[get("/stays")]
pub async fn list_stays(
    state: web::Data<HttpState>,
    auth: AuthContext,
    query: web::Query<StayListQuery>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(STAY_SCOPES)?;
    let stays = state.stays.list(query.status).await.map_err(DomainError::from)?;
    Ok(HttpResponse::Ok().json(stays))
}

/// Fetch a single stay.
#[utoipa::path(
    get,
    path = "/api/v1/stays/{id}",
    params(("id" = Uuid, Path, description = "Stay identifier")),
    responses(
        (status = 200, description = "Stay", body = Stay),
        (status = 404, description = "Unknown stay", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["stays"],
    operation_id = "getStay"
)]
#[get("/stays/{id}")]
pub async fn get_stay(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(STAY_SCOPES)?;
    let stay = state
        .stays
        .find_by_id(*id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::not_found("stay not found"))?;
    Ok(HttpResponse::Ok().json(stay))
}

fn require_cron_token(req: &HttpRequest, expected: &str) -> Result<(), DomainError> {
    let presented = req
        .headers()
        .get(CRON_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| DomainError::unauthorized("missing scheduler token"))?;
    if presented != expected {
        return Err(DomainError::unauthorized("invalid scheduler token"));
    }
    Ok(())
}

/// Close every stay whose expected check-out date has passed.
///
/// Idempotent: a rerun finds no remaining overdue stays and reports an
/// empty batch.
#[utoipa::path(
    post,
    path = "/api/v1/stays/auto-checkout",
    responses(
        (status = 200, description = "Batch report", body = AutoCheckoutReport),
        (status = 401, description = "Missing or invalid scheduler token", body = ApiError)
    ),
    params(
        ("X-Cron-Token" = String, Header, description = "Shared scheduler token")
    ),
    tags = ["stays"],
    operation_id = "autoCheckout"
)]
#[post("/stays/auto-checkout")]
pub async fn auto_checkout(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    require_cron_token(&req, &state.cron_token)?;
    let report = state.auto_checkout.run(Utc::now().date_naive()).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn cron_token_must_match() {
        let ok = TestRequest::default()
            .insert_header((CRON_TOKEN_HEADER, "sched-secret"))
            .to_http_request();
        assert!(require_cron_token(&ok, "sched-secret").is_ok());

        let wrong = TestRequest::default()
            .insert_header((CRON_TOKEN_HEADER, "other"))
            .to_http_request();
        assert!(require_cron_token(&wrong, "sched-secret").is_err());

        let missing = TestRequest::default().to_http_request();
        assert!(require_cron_token(&missing, "sched-secret").is_err());
    }
}
