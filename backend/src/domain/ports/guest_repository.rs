//! Port abstraction for guest persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::guest::Guest;

/// Guest account persistence.
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Insert a new guest record.
    async fn create(&self, guest: &Guest) -> Result<(), PersistenceError>;

    /// Fetch a guest record by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>, PersistenceError>;

    /// Fetch the active guest for a room by login name.
    async fn find_by_room_and_username(
        &self,
        room_id: Uuid,
        username: &str,
    ) -> Result<Option<Guest>, PersistenceError>;

    /// Activate or deactivate a guest account.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), PersistenceError>;
}
