//! Stay data model linking a guest to a room for a check-in period.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    /// Guest is currently checked in.
    Active,
    /// Stay has ended.
    CheckedOut,
}

impl StayStatus {
    /// Stable lowercase label used in storage and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for StayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown stay status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stay status: {0}")]
pub struct UnknownStayStatus(pub String);

impl FromStr for StayStatus {
    type Err = UnknownStayStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "checked_out" => Ok(Self::CheckedOut),
            other => Err(UnknownStayStatus(other.to_owned())),
        }
    }
}

/// The check-in/check-out period linking a guest to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    /// Stable identifier.
    pub id: Uuid,
    /// Guest account provisioned for this stay.
    pub guest_id: Uuid,
    /// Occupied room.
    pub room_id: Uuid,
    /// Check-in instant.
    pub checked_in_at: DateTime<Utc>,
    /// Date the guest is expected to leave by.
    pub expected_checkout: NaiveDate,
    /// Actual check-out instant, set when the stay closes.
    pub checked_out_at: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: StayStatus,
}

impl Stay {
    /// Open a new active stay starting now.
    pub fn open(guest_id: Uuid, room_id: Uuid, expected_checkout: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            guest_id,
            room_id,
            checked_in_at: Utc::now(),
            expected_checkout,
            checked_out_at: None,
            status: StayStatus::Active,
        }
    }

    /// Whether the guest is currently checked in.
    pub fn is_active(&self) -> bool {
        self.status == StayStatus::Active
    }

    /// Whether the stay is active past its expected check-out date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && self.expected_checkout < today
    }

    /// Close the stay, recording the check-out instant.
    ///
    /// Closing an already closed stay leaves the original check-out
    /// timestamp untouched, so repeated batch runs converge.
    pub fn close(&mut self, at: DateTime<Utc>) {
        if self.is_active() {
            self.checked_out_at = Some(at);
            self.status = StayStatus::CheckedOut;
        }
    }
}
