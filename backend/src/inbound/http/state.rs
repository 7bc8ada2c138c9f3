//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports, and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DepartmentRepository, IssueRepository, PropertyRepository, RoleRepository, StaffRepository,
    StayRepository,
};
use crate::domain::{AuthService, AutoCheckoutService, IssueService, RoomService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login and token verification use-cases.
    pub auth: Arc<AuthService>,
    /// Room lifecycle use-cases.
    pub rooms: Arc<RoomService>,
    /// Issue workflow use-cases.
    pub issues: Arc<IssueService>,
    /// Scheduled checkout batch use-case.
    pub auto_checkout: Arc<AutoCheckoutService>,
    /// Stay lookups for the read-only stays endpoints.
    pub stays: Arc<dyn StayRepository>,
    /// Department administration.
    pub departments: Arc<dyn DepartmentRepository>,
    /// Role administration.
    pub roles: Arc<dyn RoleRepository>,
    /// Staff lookups for role assignment.
    pub staff: Arc<dyn StaffRepository>,
    /// Issue lookups used to guard department deletion.
    pub issue_records: Arc<dyn IssueRepository>,
    /// Property branding storage.
    pub property: Arc<dyn PropertyRepository>,
    /// Shared secret required by the scheduled checkout endpoint.
    pub cron_token: String,
}
