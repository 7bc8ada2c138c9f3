//! Port abstractions for room and room-type persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::room::{Room, RoomNumber, RoomStatus, RoomType};

/// Room persistence.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room record.
    async fn create(&self, room: &Room) -> Result<(), PersistenceError>;

    /// Replace an existing room record.
    async fn update(&self, room: &Room) -> Result<(), PersistenceError>;

    /// Delete a room record.
    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError>;

    /// Fetch a room by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, PersistenceError>;

    /// Fetch a room by its unique number.
    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, PersistenceError>;

    /// List rooms, optionally restricted to a status.
    async fn list(&self, status: Option<RoomStatus>) -> Result<Vec<Room>, PersistenceError>;

    /// Fetch a room type by identifier.
    async fn find_type_by_id(&self, id: Uuid) -> Result<Option<RoomType>, PersistenceError>;

    /// Insert a new room type.
    async fn create_type(&self, room_type: &RoomType) -> Result<(), PersistenceError>;

    /// List all room types.
    async fn list_types(&self) -> Result<Vec<RoomType>, PersistenceError>;
}
