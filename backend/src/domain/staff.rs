//! Staff account model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An employee account.
///
/// The password hash never leaves the backend; responses expose staff via
/// handler DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Assigned role, when any. A role is held by at most one staff member.
    pub role_id: Option<Uuid>,
    /// Department the employee works in, when any.
    pub department_id: Option<Uuid>,
    /// Whether the account can log in.
    pub active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    /// Create a new active staff account.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            role_id: None,
            department_id: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style helper attaching a role.
    pub fn with_role(mut self, role_id: Uuid) -> Self {
        self.role_id = Some(role_id);
        self
    }

    /// Builder-style helper attaching a department.
    pub fn with_department(mut self, department_id: Uuid) -> Self {
        self.department_id = Some(department_id);
        self
    }
}
