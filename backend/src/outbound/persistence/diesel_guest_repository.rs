//! PostgreSQL-backed `GuestRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::guest::Guest;
use crate::domain::ports::{GuestRepository, PersistenceError};

use super::diesel_helpers::map_diesel_error;
use super::models::GuestRow;
use super::pool::DbPool;
use super::schema::guests;

/// Diesel-backed implementation of the `GuestRepository` port.
#[derive(Clone)]
pub struct DieselGuestRepository {
    pool: DbPool,
}

impl DieselGuestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for DieselGuestRepository {
    async fn create(&self, guest: &Guest) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = GuestRow::from(guest);
        diesel::insert_into(guests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = guests::table
            .find(id)
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Guest::from))
    }

    async fn find_by_room_and_username(
        &self,
        room_id: Uuid,
        username: &str,
    ) -> Result<Option<Guest>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = guests::table
            .filter(guests::room_id.eq(room_id))
            .filter(guests::username.eq(username))
            .order(guests::created_at.desc())
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Guest::from))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(guests::table.find(id))
            .set(guests::active.eq(active))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(PersistenceError::query("guest record not found"));
        }
        Ok(())
    }
}
