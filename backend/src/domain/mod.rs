//! Domain layer: entities, validation, transition services, and ports.

pub mod auth;
pub mod auth_service;
pub mod auto_checkout;
pub mod department;
pub mod error;
pub mod guest;
pub mod issue;
pub mod issue_service;
pub mod ports;
pub mod property;
pub mod role;
pub mod room;
pub mod room_service;
pub mod staff;
pub mod stay;

pub use auth::{Actor, LoginCredentials, LoginValidationError};
pub use auth_service::AuthService;
pub use auto_checkout::{AutoCheckoutReport, AutoCheckoutService};
pub use department::Department;
pub use error::{DomainError, ErrorCode};
pub use guest::{GeneratedCredentials, Guest};
pub use issue::{
    Issue, IssueFilter, IssuePriority, IssueReference, IssueReporter, IssueStatus, IssueTitle,
    IssueValidationError,
};
pub use issue_service::{IssueService, NewIssue};
pub use property::Property;
pub use role::{Role, RoleScope};
pub use room::{Room, RoomNumber, RoomStatus, RoomType, RoomValidationError};
pub use room_service::{CheckInOutcome, RoomService};
pub use staff::Staff;
pub use stay::{Stay, StayStatus};
