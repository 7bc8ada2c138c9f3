//! Port abstraction for password hashing adapters.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum HashError {
        /// Hashing a new password failed.
        Hash => "password hashing failed: {message}",
        /// A stored hash was malformed or verification errored.
        Verify => "password verification failed: {message}",
    }
}

/// Hashes passwords for storage and verifies login attempts.
///
/// A mismatching password is `Ok(false)`, not an error.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
