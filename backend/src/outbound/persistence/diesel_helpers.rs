//! Shared error mapping for the Diesel adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Map a Diesel query error onto the persistence port error.
///
/// Unique and foreign-key violations become [`PersistenceError::Conflict`]
/// so domain services can answer with an HTTP 409; everything else is a
/// query failure.
pub fn map_diesel_error(err: DieselError) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::conflict(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            PersistenceError::conflict(info.message().to_owned())
        }
        other => PersistenceError::query(other.to_string()),
    }
}

impl From<PoolError> for PersistenceError {
    fn from(err: PoolError) -> Self {
        Self::connection(err.to_string())
    }
}
