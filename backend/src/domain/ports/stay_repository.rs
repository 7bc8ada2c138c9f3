//! Port abstraction for stay persistence adapters.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::stay::{Stay, StayStatus};

/// Stay persistence.
#[async_trait]
pub trait StayRepository: Send + Sync {
    /// Insert a new stay record.
    async fn create(&self, stay: &Stay) -> Result<(), PersistenceError>;

    /// Replace an existing stay record.
    async fn update(&self, stay: &Stay) -> Result<(), PersistenceError>;

    /// Fetch a stay by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stay>, PersistenceError>;

    /// Fetch the active stay for a room, if any.
    async fn find_active_by_room(&self, room_id: Uuid) -> Result<Option<Stay>, PersistenceError>;

    /// List stays, optionally restricted to a status.
    async fn list(&self, status: Option<StayStatus>) -> Result<Vec<Stay>, PersistenceError>;

    /// List active stays whose expected check-out date is before `today`.
    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Stay>, PersistenceError>;
}
