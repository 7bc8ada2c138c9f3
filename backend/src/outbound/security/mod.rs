//! Security adapters: password hashing and bearer tokens.

mod argon_password_hasher;
mod jwt_token_service;

pub use argon_password_hasher::ArgonPasswordHasher;
pub use jwt_token_service::JwtTokenService;
