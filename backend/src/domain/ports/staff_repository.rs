//! Port abstraction for staff persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::staff::Staff;

/// Staff account persistence.
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Insert a new staff record.
    async fn create(&self, staff: &Staff) -> Result<(), PersistenceError>;

    /// Fetch a staff record by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, PersistenceError>;

    /// Fetch a staff record by login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, PersistenceError>;

    /// Fetch the staff record currently holding the given role, if any.
    async fn find_by_role(&self, role_id: Uuid) -> Result<Option<Staff>, PersistenceError>;

    /// Assign or clear the role held by a staff record.
    async fn set_role(&self, staff_id: Uuid, role_id: Option<Uuid>)
    -> Result<(), PersistenceError>;
}
