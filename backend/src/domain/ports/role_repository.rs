//! Port abstraction for role persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::role::Role;

/// Role persistence.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role record.
    async fn create(&self, role: &Role) -> Result<(), PersistenceError>;

    /// Replace an existing role record.
    async fn update(&self, role: &Role) -> Result<(), PersistenceError>;

    /// Delete a role record.
    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError>;

    /// Fetch a role by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, PersistenceError>;

    /// Fetch a role by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, PersistenceError>;

    /// List all roles.
    async fn list(&self) -> Result<Vec<Role>, PersistenceError>;
}
