//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; outbound adapters map their own failures into them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{HashError, PersistenceError, TokenError};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state (duplicates, references).
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
    /// A dependency (typically the database) is unreachable.
    ServiceUnavailable,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.trim().is_empty(), "error message must not be empty");
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<PersistenceError> for DomainError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::Connection { message } => Self::service_unavailable(message),
            PersistenceError::Query { message } => Self::internal(message),
            PersistenceError::Conflict { message } => Self::conflict(message),
        }
    }
}

impl From<TokenError> for DomainError {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Issue { message } => Self::internal(message),
            TokenError::Verify { .. } => Self::unauthorized("invalid or expired token"),
        }
    }
}

impl From<HashError> for DomainError {
    fn from(value: HashError) -> Self {
        match value {
            HashError::Hash { message } | HashError::Verify { message } => Self::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
    #[case(DomainError::forbidden("no"), ErrorCode::Forbidden)]
    #[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
    #[case(DomainError::conflict("dup"), ErrorCode::Conflict)]
    #[case(DomainError::internal("boom"), ErrorCode::InternalError)]
    #[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
    fn constructors_set_codes(#[case] error: DomainError, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[test]
    fn details_round_trip() {
        let error =
            DomainError::invalid_request("bad field").with_details(json!({ "field": "number" }));
        assert_eq!(error.details(), Some(&json!({ "field": "number" })));
    }

    #[test]
    fn serializes_snake_case_codes() {
        let value = serde_json::to_value(DomainError::conflict("dup")).expect("serialize");
        assert_eq!(value["code"], "conflict");
        assert_eq!(value["message"], "dup");
    }

    #[rstest]
    #[case(PersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(PersistenceError::query("boom"), ErrorCode::InternalError)]
    #[case(PersistenceError::conflict("dup"), ErrorCode::Conflict)]
    fn persistence_errors_map_to_domain_codes(
        #[case] error: PersistenceError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(DomainError::from(error).code(), expected);
    }
}
