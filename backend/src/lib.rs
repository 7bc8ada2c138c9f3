//! Hotel operations backend.
//!
//! A REST service managing the operational core of a single hotel: staff
//! and guest authentication, room and stay lifecycle, maintenance-issue
//! ticketing routed to departments, and property branding.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`]: entities, validation, transition services, and ports.
//! - [`inbound`]: the HTTP adapter translating requests into domain calls.
//! - [`outbound`]: Diesel persistence and security adapters behind the ports.
//! - [`server`]: configuration and dependency wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::{Trace, TraceId};
