//! Outbound adapters: persistence and security implementations of the
//! domain ports.

pub mod persistence;
pub mod security;
