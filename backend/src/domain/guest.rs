//! Guest account model and per-stay credential generation.
//!
//! Guest accounts exist for the duration of a stay: they are provisioned at
//! check-in with generated credentials and deactivated at check-out.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

use crate::domain::room::RoomNumber;

/// Length of generated guest passwords.
pub const GUEST_PASSWORD_LEN: usize = 10;

/// A per-stay guest account tied to a room.
///
/// The password hash never leaves the backend; responses expose guests via
/// handler DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    /// Stable identifier.
    pub id: Uuid,
    /// Login name, derived from the room number at check-in.
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Name provided at check-in.
    pub full_name: String,
    /// Room the account is bound to.
    pub room_id: Uuid,
    /// Whether the guest can currently log in.
    pub active: bool,
    /// Provisioning timestamp.
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Provision an active guest account.
    pub fn provision(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
        room_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            room_id,
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Plaintext credentials generated at check-in and returned exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCredentials {
    /// Login name for the guest.
    pub username: String,
    /// One-time plaintext password; only its hash is stored.
    pub password: String,
}

impl GeneratedCredentials {
    /// Generate credentials for the given room.
    ///
    /// The username is derived from the room number so front-desk staff can
    /// relay it verbally; the password is random.
    pub fn for_room(room_number: &RoomNumber) -> Self {
        let password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GUEST_PASSWORD_LEN)
            .map(char::from)
            .collect();
        Self {
            username: format!("guest-{}", room_number.as_ref().to_ascii_lowercase()),
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_derive_username_from_room_number() {
        let number = RoomNumber::new("PH-1").expect("valid number");
        let credentials = GeneratedCredentials::for_room(&number);
        assert_eq!(credentials.username, "guest-ph-1");
        assert_eq!(credentials.password.len(), GUEST_PASSWORD_LEN);
    }

    #[test]
    fn generated_passwords_differ_between_calls() {
        let number = RoomNumber::new("101").expect("valid number");
        let first = GeneratedCredentials::for_room(&number);
        let second = GeneratedCredentials::for_room(&number);
        assert_ne!(first.password, second.password);
    }

    #[test]
    fn provisioned_guest_starts_active() {
        let guest = Guest::provision("guest-101", "hash", "Ada Lovelace", Uuid::new_v4());
        assert!(guest.active);
    }
}
