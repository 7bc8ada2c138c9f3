//! Port abstraction for bearer-token issuance and verification.

use super::define_port_error;
use crate::domain::auth::Actor;

define_port_error! {
    /// Failures raised by token service adapters.
    pub enum TokenError {
        /// Token could not be signed.
        Issue => "token issuance failed: {message}",
        /// Token failed signature, claim, or expiry checks.
        Verify => "token verification failed: {message}",
    }
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Opaque token string for the `Authorization: Bearer` header.
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Issues and verifies bearer tokens for authenticated actors.
pub trait TokenService: Send + Sync {
    /// Issue a signed token encoding the actor.
    fn issue(&self, actor: &Actor) -> Result<IssuedToken, TokenError>;

    /// Verify a presented token and recover the actor behind it.
    fn verify(&self, token: &str) -> Result<Actor, TokenError>;
}
