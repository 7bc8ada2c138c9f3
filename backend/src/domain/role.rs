//! Role model and permission scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Permission scope attached to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleScope {
    /// Full access, including property settings.
    Admin,
    /// Rooms, stays, issues, and department administration.
    Manager,
    /// Rooms, stays, and issues.
    #[serde(rename = "frontdesk")]
    FrontDesk,
    /// Issue reporting and handling only.
    Staff,
}

impl RoleScope {
    /// Stable lowercase label used in storage and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::FrontDesk => "frontdesk",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown scope label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role scope: {0}")]
pub struct UnknownRoleScope(pub String);

impl FromStr for RoleScope {
    type Err = UnknownRoleScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "frontdesk" => Ok(Self::FrontDesk),
            "staff" => Ok(Self::Staff),
            other => Err(UnknownRoleScope(other.to_owned())),
        }
    }
}

/// A named role carrying a permission scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique role name, e.g. "Night Manager".
    pub name: String,
    /// Permission scope granted to the holder.
    pub scope: RoleScope,
}

impl Role {
    /// Create a new role.
    pub fn new(name: impl Into<String>, scope: RoleScope) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope,
        }
    }
}
