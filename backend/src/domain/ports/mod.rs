//! Port abstractions decoupling the domain from adapters.
//!
//! Repositories are implemented by the Diesel persistence layer; the token
//! and password ports by the security adapters. In-memory implementations
//! live in `test_support` for tests.

mod macros;

mod department_repository;
mod guest_repository;
mod issue_repository;
mod password_hasher;
mod property_repository;
mod role_repository;
mod room_repository;
mod staff_repository;
mod stay_repository;
mod token_service;

pub use department_repository::DepartmentRepository;
pub use guest_repository::GuestRepository;
pub use issue_repository::IssueRepository;
pub use password_hasher::{HashError, PasswordHasher};
pub use property_repository::PropertyRepository;
pub use role_repository::RoleRepository;
pub use room_repository::RoomRepository;
pub use staff_repository::StaffRepository;
pub use stay_repository::StayRepository;
pub use token_service::{IssuedToken, TokenError, TokenService};

pub(crate) use macros::define_port_error;

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum PersistenceError {
        /// Store connection could not be established or checked out.
        Connection => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "repository query failed: {message}",
        /// A uniqueness or reference constraint was violated.
        Conflict => "repository constraint violated: {message}",
    }
}
