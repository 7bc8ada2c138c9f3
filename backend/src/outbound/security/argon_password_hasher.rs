//! Argon2id password hashing adapter.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::domain::ports::{HashError, PasswordHasher};

/// [`PasswordHasher`] backed by Argon2id with PHC-format output.
#[derive(Default, Clone)]
pub struct ArgonPasswordHasher;

impl PasswordHasher for ArgonPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        argon2::PasswordHasher::hash_password(&Argon2::default(), password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| HashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| HashError::verify(err.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(HashError::verify(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = ArgonPasswordHasher;
        let hash = hasher.hash("hunter2").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("hunter2", &hash).expect("verify"));
        assert!(!hasher.verify("hunter3", &hash).expect("verify"));
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        let hasher = ArgonPasswordHasher;
        let err = hasher
            .verify("hunter2", "not-a-phc-string")
            .expect_err("malformed hash");
        assert!(matches!(err, HashError::Verify { .. }));
    }
}
