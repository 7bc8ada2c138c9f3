//! Department model used for issue routing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An operational department issues are routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique department name, e.g. "Housekeeping".
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl Department {
    /// Create a new department.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
        }
    }
}
