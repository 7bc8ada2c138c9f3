//! Port abstraction for issue persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::issue::{Issue, IssueFilter};

/// Issue persistence.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Insert a new issue record.
    async fn create(&self, issue: &Issue) -> Result<(), PersistenceError>;

    /// Replace an existing issue record.
    async fn update(&self, issue: &Issue) -> Result<(), PersistenceError>;

    /// Fetch an issue by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, PersistenceError>;

    /// List issues matching the filter, newest first.
    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, PersistenceError>;

    /// Whether any issue references the given department.
    async fn any_for_department(&self, department_id: Uuid) -> Result<bool, PersistenceError>;
}
