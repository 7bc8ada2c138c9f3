//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. The
//! document is served by Swagger UI in debug builds only.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::auto_checkout::{AutoCheckoutFailure, AutoCheckoutReport};
use crate::domain::department::Department;
use crate::domain::issue::{Issue, IssuePriority, IssueReporter, IssueStatus};
use crate::domain::property::Property;
use crate::domain::role::{Role, RoleScope};
use crate::domain::room::{Room, RoomStatus, RoomType};
use crate::domain::stay::{Stay, StayStatus};
use crate::inbound::http::auth::{GuestLoginRequest, LoginRequest, MeResponse, TokenResponse};
use crate::inbound::http::departments::DepartmentRequest;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::issues::{IssueDepartmentRequest, IssueRequest, IssueStatusRequest};
use crate::inbound::http::property::PropertyRequest;
use crate::inbound::http::roles::{RoleAssignmentRequest, RoleRequest};
use crate::inbound::http::rooms::{CheckInRequest, CheckInResponse, RoomRequest, RoomTypeRequest};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Bearer token issued by POST /api/v1/auth/login or \
                         POST /api/v1/auth/guest-login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hotel operations backend API",
        description = "HTTP interface for room and stay lifecycle management, \
                       issue ticketing, and property branding."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::staff_login,
        crate::inbound::http::auth::guest_login,
        crate::inbound::http::auth::me,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::rooms::create_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::delete_room,
        crate::inbound::http::rooms::select_room,
        crate::inbound::http::rooms::check_in,
        crate::inbound::http::rooms::check_out,
        crate::inbound::http::rooms::set_maintenance,
        crate::inbound::http::rooms::set_ready,
        crate::inbound::http::rooms::list_room_types,
        crate::inbound::http::rooms::create_room_type,
        crate::inbound::http::stays::list_stays,
        crate::inbound::http::stays::get_stay,
        crate::inbound::http::stays::auto_checkout,
        crate::inbound::http::issues::create_issue,
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::issues::get_issue,
        crate::inbound::http::issues::update_issue_status,
        crate::inbound::http::issues::reroute_issue,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::update_department,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::roles::list_roles,
        crate::inbound::http::roles::create_role,
        crate::inbound::http::roles::update_role,
        crate::inbound::http::roles::delete_role,
        crate::inbound::http::roles::assign_role,
        crate::inbound::http::property::get_property,
        crate::inbound::http::property::update_property,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        LoginRequest,
        GuestLoginRequest,
        TokenResponse,
        MeResponse,
        Room,
        RoomStatus,
        RoomType,
        RoomRequest,
        RoomTypeRequest,
        CheckInRequest,
        CheckInResponse,
        Stay,
        StayStatus,
        AutoCheckoutReport,
        AutoCheckoutFailure,
        Issue,
        IssueStatus,
        IssuePriority,
        IssueReporter,
        IssueRequest,
        IssueStatusRequest,
        IssueDepartmentRequest,
        Department,
        DepartmentRequest,
        Role,
        RoleScope,
        RoleRequest,
        RoleAssignmentRequest,
        Property,
        PropertyRequest,
    )),
    tags(
        (name = "auth", description = "Staff and guest authentication"),
        (name = "rooms", description = "Room lifecycle and room types"),
        (name = "stays", description = "Stay records and scheduled checkout"),
        (name = "issues", description = "Maintenance and operational issue tickets"),
        (name = "departments", description = "Department administration"),
        (name = "roles", description = "Role administration and assignment"),
        (name = "property", description = "Property branding"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
