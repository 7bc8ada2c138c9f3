//! Port abstraction for the single-record property branding store.

use async_trait::async_trait;

use super::PersistenceError;
use crate::domain::property::Property;

/// Property branding persistence. The store holds at most one record.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Fetch the branding record, if one has been set.
    async fn get(&self) -> Result<Option<Property>, PersistenceError>;

    /// Insert or replace the branding record.
    async fn upsert(&self, property: &Property) -> Result<(), PersistenceError>;
}
