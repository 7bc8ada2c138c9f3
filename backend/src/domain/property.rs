//! Property branding record for the deployed hotel instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The single branding record (name, logo, contact details).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Display name of the property.
    pub name: String,
    /// URL of the property logo, when set.
    pub logo_url: Option<String>,
    /// Public contact email.
    pub contact_email: Option<String>,
    /// Public contact phone number.
    pub contact_phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Create a branding record with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo_url: None,
            contact_email: None,
            contact_phone: None,
            address: None,
            updated_at: Utc::now(),
        }
    }
}
