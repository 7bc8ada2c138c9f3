//! Server construction: configuration and dependency wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use crate::domain::{AuthService, AutoCheckoutService, IssueService, RoomService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselDepartmentRepository, DieselGuestRepository, DieselIssueRepository,
    DieselPropertyRepository, DieselRoleRepository, DieselRoomRepository, DieselStaffRepository,
    DieselStayRepository,
};
use crate::outbound::security::{ArgonPasswordHasher, JwtTokenService};

/// Wire Diesel adapters and domain services into the HTTP dependency bundle.
pub fn build_http_state(pool: &DbPool, config: &AppConfig) -> HttpState {
    let staff = Arc::new(DieselStaffRepository::new(pool.clone()));
    let guests = Arc::new(DieselGuestRepository::new(pool.clone()));
    let rooms = Arc::new(DieselRoomRepository::new(pool.clone()));
    let stays = Arc::new(DieselStayRepository::new(pool.clone()));
    let issues = Arc::new(DieselIssueRepository::new(pool.clone()));
    let departments = Arc::new(DieselDepartmentRepository::new(pool.clone()));
    let roles = Arc::new(DieselRoleRepository::new(pool.clone()));
    let property = Arc::new(DieselPropertyRepository::new(pool.clone()));

    let hasher = Arc::new(ArgonPasswordHasher);
    let tokens = Arc::new(JwtTokenService::new(
        &config.jwt_secret,
        config.issuer.clone(),
        config.token_ttl_secs,
    ));

    let auth = Arc::new(AuthService::new(
        staff.clone(),
        guests.clone(),
        rooms.clone(),
        roles.clone(),
        hasher.clone(),
        tokens,
    ));
    let room_service = Arc::new(RoomService::new(
        rooms.clone(),
        stays.clone(),
        guests.clone(),
        hasher,
    ));
    let issue_service = Arc::new(IssueService::new(issues.clone(), departments.clone()));
    let auto_checkout = Arc::new(AutoCheckoutService::new(stays.clone(), guests, rooms));

    HttpState {
        auth,
        rooms: room_service,
        issues: issue_service,
        auto_checkout,
        stays,
        departments,
        roles,
        staff,
        issue_records: issues,
        property,
        cron_token: config.cron_token.clone(),
    }
}
