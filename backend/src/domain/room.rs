//! Room and room-type data models, including the room status machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for room fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomValidationError {
    /// Room number was empty or whitespace.
    EmptyNumber,
    /// Room number exceeded the allowed length.
    NumberTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Room number carried characters outside letters, digits, and dashes.
    NumberInvalidCharacters,
    /// Unknown room status label.
    UnknownStatus(String),
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "room number must not be empty"),
            Self::NumberTooLong { max } => {
                write!(f, "room number must be at most {max} characters")
            }
            Self::NumberInvalidCharacters => {
                write!(f, "room number may only contain letters, digits, or dashes")
            }
            Self::UnknownStatus(raw) => write!(f, "unknown room status: {raw}"),
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// Maximum accepted length for a room number.
pub const ROOM_NUMBER_MAX: usize = 10;

/// Validated room number, unique per property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Validate and construct a [`RoomNumber`].
    pub fn new(number: impl Into<String>) -> Result<Self, RoomValidationError> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(RoomValidationError::EmptyNumber);
        }
        if number.chars().count() > ROOM_NUMBER_MAX {
            return Err(RoomValidationError::NumberTooLong {
                max: ROOM_NUMBER_MAX,
            });
        }
        if !number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(RoomValidationError::NumberInvalidCharacters);
        }
        Ok(Self(number))
    }
}

impl AsRef<str> for RoomNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RoomNumber> for String {
    fn from(value: RoomNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = RoomValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of a room.
///
/// Allowed transitions:
/// `available -> selected -> occupied -> available`, with `maintenance`
/// reachable from `available` and `selected` and returning to `available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Ready to be offered to a guest.
    Available,
    /// Earmarked for an incoming guest, not yet checked in.
    Selected,
    /// Hosting an active stay.
    Occupied,
    /// Withdrawn from service.
    Maintenance,
}

impl RoomStatus {
    /// Stable lowercase label used in storage and the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Selected => "selected",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Available, Self::Selected)
                | (Self::Available, Self::Maintenance)
                | (Self::Selected, Self::Occupied)
                | (Self::Selected, Self::Maintenance)
                | (Self::Occupied, Self::Available)
                | (Self::Maintenance, Self::Available)
        )
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = RoomValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "selected" => Ok(Self::Selected),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(RoomValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique room number.
    #[schema(value_type = String, example = "204")]
    pub number: RoomNumber,
    /// Reference to the room type record.
    pub room_type_id: Uuid,
    /// Current lifecycle status.
    pub status: RoomStatus,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Create a new room starting in [`RoomStatus::Available`].
    pub fn new(number: RoomNumber, room_type_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number,
            room_type_id,
            status: RoomStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Category a room belongs to (single, double, suite and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique type name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl RoomType {
    /// Create a new room type.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("101", true)]
    #[case("2-B", true)]
    #[case("PH-1", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("10 1", false)]
    #[case("12345678901", false)]
    fn room_number_validation(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(RoomNumber::new(raw).is_ok(), ok, "number: {raw:?}");
    }

    #[rstest]
    #[case(RoomStatus::Available, RoomStatus::Selected, true)]
    #[case(RoomStatus::Available, RoomStatus::Maintenance, true)]
    #[case(RoomStatus::Available, RoomStatus::Occupied, false)]
    #[case(RoomStatus::Selected, RoomStatus::Occupied, true)]
    #[case(RoomStatus::Selected, RoomStatus::Maintenance, true)]
    #[case(RoomStatus::Selected, RoomStatus::Available, false)]
    #[case(RoomStatus::Occupied, RoomStatus::Available, true)]
    #[case(RoomStatus::Occupied, RoomStatus::Maintenance, false)]
    #[case(RoomStatus::Maintenance, RoomStatus::Available, true)]
    #[case(RoomStatus::Maintenance, RoomStatus::Occupied, false)]
    fn status_transition_table(
        #[case] from: RoomStatus,
        #[case] to: RoomStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition(to), allowed, "{from} -> {to}");
    }

    #[rstest]
    #[case(RoomStatus::Available)]
    #[case(RoomStatus::Selected)]
    #[case(RoomStatus::Occupied)]
    #[case(RoomStatus::Maintenance)]
    fn status_labels_round_trip(#[case] status: RoomStatus) {
        assert_eq!(status.as_str().parse::<RoomStatus>(), Ok(status));
    }

    #[test]
    fn new_room_starts_available() {
        let number = RoomNumber::new("101").expect("valid number");
        let room = Room::new(number, Uuid::new_v4());
        assert_eq!(room.status, RoomStatus::Available);
    }
}
