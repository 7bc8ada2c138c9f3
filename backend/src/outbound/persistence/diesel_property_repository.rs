//! PostgreSQL-backed `PropertyRepository` implementation using Diesel.
//!
//! The branding table holds at most one row; updates are an upsert keyed on
//! the fixed row id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, PropertyRepository};
use crate::domain::property::Property;

use super::diesel_helpers::map_diesel_error;
use super::models::{PROPERTY_ROW_ID, PropertyRow};
use super::pool::DbPool;
use super::schema::property;

/// Diesel-backed implementation of the `PropertyRepository` port.
#[derive(Clone)]
pub struct DieselPropertyRepository {
    pool: DbPool,
}

impl DieselPropertyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for DieselPropertyRepository {
    async fn get(&self) -> Result<Option<Property>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = property::table
            .find(PROPERTY_ROW_ID)
            .select(PropertyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Property::from))
    }

    async fn upsert(&self, record: &Property) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = PropertyRow::from(record);
        diesel::insert_into(property::table)
            .values(&row)
            .on_conflict(property::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
