//! PostgreSQL-backed `StayRepository` implementation using Diesel.
//!
//! A partial unique index on `stays.room_id` (active rows only) keeps each
//! room limited to one active stay; violating it surfaces as a conflict.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PersistenceError, StayRepository};
use crate::domain::stay::{Stay, StayStatus};

use super::diesel_helpers::map_diesel_error;
use super::models::StayRow;
use super::pool::DbPool;
use super::schema::stays;

/// Diesel-backed implementation of the `StayRepository` port.
#[derive(Clone)]
pub struct DieselStayRepository {
    pool: DbPool,
}

impl DieselStayRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StayRepository for DieselStayRepository {
    async fn create(&self, stay: &Stay) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = StayRow::from(stay);
        diesel::insert_into(stays::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, stay: &Stay) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = StayRow::from(stay);
        diesel::update(stays::table.find(stay.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stay>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        stays::table
            .find(id)
            .select(StayRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Stay::try_from)
            .transpose()
    }

    async fn find_active_by_room(&self, room_id: Uuid) -> Result<Option<Stay>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        stays::table
            .filter(stays::room_id.eq(room_id))
            .filter(stays::status.eq(StayStatus::Active.as_str()))
            .select(StayRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Stay::try_from)
            .transpose()
    }

    async fn list(&self, status: Option<StayStatus>) -> Result<Vec<Stay>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let mut query = stays::table
            .select(StayRow::as_select())
            .order(stays::checked_in_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(stays::status.eq(status.as_str()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(Stay::try_from).collect()
    }

    async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<Stay>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows = stays::table
            .filter(stays::status.eq(StayStatus::Active.as_str()))
            .filter(stays::expected_checkout.lt(today))
            .select(StayRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Stay::try_from).collect()
    }
}
