//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are deliberately thin: they translate between Diesel row
//! structs (`models.rs`) and domain types, and map database failures onto
//! [`crate::domain::ports::PersistenceError`]. No business logic lives here.

pub(crate) mod diesel_helpers;

mod diesel_department_repository;
mod diesel_guest_repository;
mod diesel_issue_repository;
mod diesel_property_repository;
mod diesel_role_repository;
mod diesel_room_repository;
mod diesel_staff_repository;
mod diesel_stay_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_guest_repository::DieselGuestRepository;
pub use diesel_issue_repository::DieselIssueRepository;
pub use diesel_property_repository::DieselPropertyRepository;
pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_staff_repository::DieselStaffRepository;
pub use diesel_stay_repository::DieselStayRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
