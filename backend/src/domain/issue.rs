//! Maintenance/operational issue model and its status workflow.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for issue fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueValidationError {
    /// Title was empty or whitespace.
    EmptyTitle,
    /// Title exceeded the allowed length.
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Unknown status label.
    UnknownStatus(String),
    /// Unknown priority label.
    UnknownPriority(String),
    /// Unknown reporter kind label.
    UnknownReporterKind(String),
}

impl fmt::Display for IssueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "issue title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "issue title must be at most {max} characters")
            }
            Self::UnknownStatus(raw) => write!(f, "unknown issue status: {raw}"),
            Self::UnknownPriority(raw) => write!(f, "unknown issue priority: {raw}"),
            Self::UnknownReporterKind(raw) => write!(f, "unknown reporter kind: {raw}"),
        }
    }
}

impl std::error::Error for IssueValidationError {}

/// Maximum accepted length for an issue title.
pub const ISSUE_TITLE_MAX: usize = 120;

/// Validated issue title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueTitle(String);

impl IssueTitle {
    /// Validate and construct an [`IssueTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, IssueValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(IssueValidationError::EmptyTitle);
        }
        if title.chars().count() > ISSUE_TITLE_MAX {
            return Err(IssueValidationError::TitleTooLong {
                max: ISSUE_TITLE_MAX,
            });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for IssueTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IssueTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IssueTitle> for String {
    fn from(value: IssueTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for IssueTitle {
    type Error = IssueValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Server-generated reference code shown to reporters, e.g. `ISS-4F2A1C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueReference(String);

impl IssueReference {
    /// Generate a fresh reference code.
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        let suffix: String = raw.chars().take(6).collect();
        Self(format!("ISS-{}", suffix.to_ascii_uppercase()))
    }

    /// Wrap an existing reference code loaded from storage.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for IssueReference {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Workflow status of an issue.
///
/// Allowed transitions: `open -> in_progress -> resolved`, with resolved
/// issues reopenable back to `in_progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Reported, not yet picked up.
    Open,
    /// Being worked by the routed department.
    InProgress,
    /// Fixed; resolution remarks recorded.
    Resolved,
}

impl IssueStatus {
    /// Stable lowercase label used in storage and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress)
                | (Self::InProgress, Self::Resolved)
                | (Self::Resolved, Self::InProgress)
        )
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = IssueValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(IssueValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Urgency of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs prompt attention.
    High,
}

impl IssuePriority {
    /// Stable lowercase label used in storage and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssuePriority {
    type Err = IssueValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(IssueValidationError::UnknownPriority(other.to_owned())),
        }
    }
}

/// Who reported an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueReporter {
    /// Reported by an employee.
    Staff {
        /// Staff account id.
        id: Uuid,
    },
    /// Reported by a checked-in guest.
    Guest {
        /// Guest account id.
        id: Uuid,
    },
}

impl IssueReporter {
    /// Storage label for the reporter kind column.
    pub fn kind_str(self) -> &'static str {
        match self {
            Self::Staff { .. } => "staff",
            Self::Guest { .. } => "guest",
        }
    }

    /// Account id of the reporter.
    pub fn reporter_id(self) -> Uuid {
        match self {
            Self::Staff { id } | Self::Guest { id } => id,
        }
    }

    /// Rebuild a reporter from its storage representation.
    pub fn from_stored(kind: &str, id: Uuid) -> Result<Self, IssueValidationError> {
        match kind {
            "staff" => Ok(Self::Staff { id }),
            "guest" => Ok(Self::Guest { id }),
            other => Err(IssueValidationError::UnknownReporterKind(other.to_owned())),
        }
    }
}

/// A maintenance/operational ticket routed to a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable identifier.
    pub id: Uuid,
    /// Server-generated reference code.
    #[schema(value_type = String, example = "ISS-4F2A1C")]
    pub reference: IssueReference,
    /// Short summary.
    #[schema(value_type = String, example = "Leaking shower head")]
    pub title: IssueTitle,
    /// Free-text description.
    pub description: String,
    /// Department the issue is routed to.
    pub department_id: Uuid,
    /// Room the issue concerns, when any.
    pub room_id: Option<Uuid>,
    /// Who reported the issue.
    pub reporter: IssueReporter,
    /// Current workflow status.
    pub status: IssueStatus,
    /// Urgency.
    pub priority: IssuePriority,
    /// Required once the issue is resolved.
    pub resolution_remarks: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Open a new issue with a generated reference code.
    pub fn open(
        title: IssueTitle,
        description: impl Into<String>,
        department_id: Uuid,
        room_id: Option<Uuid>,
        reporter: IssueReporter,
        priority: IssuePriority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reference: IssueReference::generate(),
            title,
            description: description.into(),
            department_id,
            room_id,
            reporter,
            status: IssueStatus::Open,
            priority,
            resolution_remarks: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters accepted by the issue listing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Restrict to a workflow status.
    pub status: Option<IssueStatus>,
    /// Restrict to a department.
    pub department_id: Option<Uuid>,
    /// Restrict to a priority.
    pub priority: Option<IssuePriority>,
    /// Restrict to a single reporter.
    pub reporter: Option<IssueReporter>,
}
