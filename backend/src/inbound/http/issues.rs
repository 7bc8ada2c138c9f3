//! Issue ticketing endpoints.
//!
//! ```text
//! POST /api/v1/issues                   Report an issue
//! GET  /api/v1/issues                   List issues
//! GET  /api/v1/issues/{id}              Fetch an issue
//! POST /api/v1/issues/{id}/status       Move the issue along its workflow
//! POST /api/v1/issues/{id}/department   Re-route to another department
//! ```
//!
//! Guests may report and view issues for their own room only; the domain
//! service pins guest reports to the guest's stay.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::issue::{Issue, IssueFilter, IssuePriority, IssueStatus, IssueTitle};
use crate::domain::{DomainError, NewIssue, RoleScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthContext;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

const WORKFLOW_SCOPES: &[RoleScope] = &[
    RoleScope::Admin,
    RoleScope::Manager,
    RoleScope::FrontDesk,
    RoleScope::Staff,
];

/// Issue creation request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    /// Short summary.
    #[schema(example = "Leaking shower head")]
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Department to route the issue to.
    pub department_id: Uuid,
    /// Room the issue concerns; filled in automatically for guests.
    pub room_id: Option<Uuid>,
    /// Urgency; defaults to medium.
    #[serde(default)]
    pub priority: IssuePriority,
}

/// Issue listing filter.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct IssueListQuery {
    /// Restrict to a workflow status.
    pub status: Option<IssueStatus>,
    /// Restrict to a department.
    pub department_id: Option<Uuid>,
    /// Restrict to a priority.
    pub priority: Option<IssuePriority>,
}

/// Status transition request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatusRequest {
    /// Target workflow status.
    pub status: IssueStatus,
    /// Resolution remarks, required when resolving.
    pub remarks: Option<String>,
}

/// Department re-route request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueDepartmentRequest {
    /// Target department identifier.
    pub department_id: Uuid,
}

/// Report an issue.
#[utoipa::path(
    post,
    path = "/api/v1/issues",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Issue opened", body = Issue),
        (status = 400, description = "Invalid title or unknown department", body = ApiError),
        (status = 403, description = "Guest reported against another room", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["issues"],
    operation_id = "createIssue"
)]
#[post("/issues")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<IssueRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let title = IssueTitle::new(payload.title)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let new_issue = NewIssue {
        title,
        description: payload.description,
        department_id: payload.department_id,
        room_id: payload.room_id,
        priority: payload.priority,
    };
    let issue = state.issues.create(auth.actor(), new_issue).await?;
    Ok(HttpResponse::Created().json(issue))
}

/// List issues, newest first.
///
/// Guests always see only their own reports regardless of filters.
#[utoipa::path(
    get,
    path = "/api/v1/issues",
    params(IssueListQuery),
    responses(
        (status = 200, description = "Issues", body = [Issue]),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["issues"],
    operation_id = "listIssues"
)]
#[get("/issues")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    auth: AuthContext,
    query: web::Query<IssueListQuery>,
) -> ApiResult<HttpResponse> {
    let filter = IssueFilter {
        status: query.status,
        department_id: query.department_id,
        priority: query.priority,
        reporter: None,
    };
    let issues = state.issues.list(auth.actor(), filter).await?;
    Ok(HttpResponse::Ok().json(issues))
}

/// Fetch a single issue.
#[utoipa::path(
    get,
    path = "/api/v1/issues/{id}",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    responses(
        (status = 200, description = "Issue", body = Issue),
        (status = 404, description = "Unknown issue", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["issues"],
    operation_id = "getIssue"
)]
#[get("/issues/{id}")]
pub async fn get_issue(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let issue = state.issues.get(auth.actor(), *id).await?;
    Ok(HttpResponse::Ok().json(issue))
}

/// Move an issue along its workflow.
///
/// Resolving requires remarks; reopening keeps the previous remarks.
#[utoipa::path(
    post,
    path = "/api/v1/issues/{id}/status",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    request_body = IssueStatusRequest,
    responses(
        (status = 200, description = "Issue updated", body = Issue),
        (status = 400, description = "Illegal transition or missing remarks", body = ApiError),
        (status = 403, description = "Guests cannot work issues", body = ApiError),
        (status = 404, description = "Unknown issue", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["issues"],
    operation_id = "updateIssueStatus"
)]
#[post("/issues/{id}/status")]
pub async fn update_issue_status(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<IssueStatusRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(WORKFLOW_SCOPES)?;
    let payload = payload.into_inner();
    let issue = state
        .issues
        .update_status(*id, payload.status, payload.remarks)
        .await?;
    Ok(HttpResponse::Ok().json(issue))
}

/// Re-route an issue to another department.
#[utoipa::path(
    post,
    path = "/api/v1/issues/{id}/department",
    params(("id" = Uuid, Path, description = "Issue identifier")),
    request_body = IssueDepartmentRequest,
    responses(
        (status = 200, description = "Issue re-routed", body = Issue),
        (status = 400, description = "Unknown department", body = ApiError),
        (status = 403, description = "Insufficient permissions", body = ApiError),
        (status = 404, description = "Unknown issue", body = ApiError)
    ),
    security(("bearer" = [])),
    tags = ["issues"],
    operation_id = "rerouteIssue"
)]
#[post("/issues/{id}/department")]
pub async fn reroute_issue(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
    payload: web::Json<IssueDepartmentRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_scope(&[RoleScope::Admin, RoleScope::Manager])?;
    let issue = state.issues.reroute(*id, payload.department_id).await?;
    Ok(HttpResponse::Ok().json(issue))
}
