//! Authentication primitives: credentials and the authenticated actor.

use std::fmt;

use uuid::Uuid;

use crate::domain::role::RoleScope;

/// Validation errors raised when constructing [`LoginCredentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was empty or whitespace.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// Passwords are deliberately excluded from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct credentials from their parts.
    pub fn try_from_parts(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, LoginValidationError> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self { username, password })
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password, only ever compared against a stored hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The authenticated principal behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// An employee with a permission scope.
    Staff {
        /// Staff account id.
        id: Uuid,
        /// Scope derived from the assigned role.
        scope: RoleScope,
    },
    /// A checked-in guest bound to a room.
    Guest {
        /// Guest account id.
        id: Uuid,
        /// Room the guest is staying in.
        room_id: Uuid,
    },
}

impl Actor {
    /// Account id of the actor.
    pub fn id(self) -> Uuid {
        match self {
            Self::Staff { id, .. } | Self::Guest { id, .. } => id,
        }
    }

    /// Staff scope, when the actor is an employee.
    pub fn staff_scope(self) -> Option<RoleScope> {
        match self {
            Self::Staff { scope, .. } => Some(scope),
            Self::Guest { .. } => None,
        }
    }

    /// Whether the actor is an employee holding one of the given scopes.
    pub fn has_scope(self, scopes: &[RoleScope]) -> bool {
        self.staff_scope().is_some_and(|s| scopes.contains(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret", Err(LoginValidationError::EmptyUsername))]
    #[case("  ", "secret", Err(LoginValidationError::EmptyUsername))]
    #[case("ada", "", Err(LoginValidationError::EmptyPassword))]
    #[case("ada", "secret", Ok(()))]
    fn credential_validation(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: Result<(), LoginValidationError>,
    ) {
        let result = LoginCredentials::try_from_parts(username, password).map(|_| ());
        assert_eq!(result, expected);
    }

    #[test]
    fn debug_output_redacts_password() {
        let credentials = LoginCredentials::try_from_parts("ada", "secret").expect("valid");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn scope_checks() {
        let staff = Actor::Staff {
            id: Uuid::new_v4(),
            scope: RoleScope::Manager,
        };
        assert!(staff.has_scope(&[RoleScope::Admin, RoleScope::Manager]));
        assert!(!staff.has_scope(&[RoleScope::Admin]));

        let guest = Actor::Guest {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
        };
        assert!(!guest.has_scope(&[RoleScope::Staff]));
        assert_eq!(guest.staff_scope(), None);
    }
}
