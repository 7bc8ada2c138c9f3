//! HTTP inbound adapter exposing the REST API.
//!
//! All business endpoints live under `/api/v1`; health probes sit at the
//! root so orchestrators can reach them without a version prefix.

pub mod auth;
pub mod bearer;
pub mod departments;
pub mod error;
pub mod health;
pub mod issues;
pub mod property;
pub mod roles;
pub mod rooms;
pub mod state;
pub mod stays;

pub use error::{ApiError, ApiResult};

use actix_web::web;

/// Register every REST endpoint on the given service config.
///
/// The caller supplies `HttpState` and `HealthState` via `app_data`; this
/// only wires routes, so tests can mount the same surface over in-memory
/// adapters.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(health::live).service(health::ready).service(
        web::scope("/api/v1")
            .service(auth::staff_login)
            .service(auth::guest_login)
            .service(auth::me)
            .service(rooms::list_rooms)
            .service(rooms::create_room)
            .service(rooms::get_room)
            .service(rooms::update_room)
            .service(rooms::delete_room)
            .service(rooms::select_room)
            .service(rooms::check_in)
            .service(rooms::check_out)
            .service(rooms::set_maintenance)
            .service(rooms::set_ready)
            .service(rooms::list_room_types)
            .service(rooms::create_room_type)
            .service(stays::auto_checkout)
            .service(stays::list_stays)
            .service(stays::get_stay)
            .service(issues::create_issue)
            .service(issues::list_issues)
            .service(issues::get_issue)
            .service(issues::update_issue_status)
            .service(issues::reroute_issue)
            .service(departments::list_departments)
            .service(departments::create_department)
            .service(departments::update_department)
            .service(departments::delete_department)
            .service(roles::list_roles)
            .service(roles::create_role)
            .service(roles::update_role)
            .service(roles::delete_role)
            .service(roles::assign_role)
            .service(property::get_property)
            .service(property::update_property),
    );
}
