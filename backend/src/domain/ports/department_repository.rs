//! Port abstraction for department persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::department::Department;

/// Department persistence.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Insert a new department record.
    async fn create(&self, department: &Department) -> Result<(), PersistenceError>;

    /// Replace an existing department record.
    async fn update(&self, department: &Department) -> Result<(), PersistenceError>;

    /// Delete a department record.
    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError>;

    /// Fetch a department by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, PersistenceError>;

    /// Fetch a department by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, PersistenceError>;

    /// List all departments.
    async fn list(&self) -> Result<Vec<Department>, PersistenceError>;
}
