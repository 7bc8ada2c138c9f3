//! PostgreSQL-backed `RoomRepository` implementation using Diesel.
//!
//! Persists rooms and room types. Room-number uniqueness is enforced by a
//! unique index and surfaces as [`PersistenceError::Conflict`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PersistenceError, RoomRepository};
use crate::domain::room::{Room, RoomNumber, RoomStatus, RoomType};

use super::diesel_helpers::map_diesel_error;
use super::models::{RoomRow, RoomTypeRow};
use super::pool::DbPool;
use super::schema::{room_types, rooms};

/// Diesel-backed implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn create(&self, room: &Room) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = RoomRow::from(room);
        diesel::insert_into(rooms::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = RoomRow::from(room);
        diesel::update(rooms::table.find(room.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::delete(rooms::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        rooms::table
            .find(id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Room::try_from)
            .transpose()
    }

    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        rooms::table
            .filter(rooms::number.eq(number.as_ref()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Room::try_from)
            .transpose()
    }

    async fn list(&self, status: Option<RoomStatus>) -> Result<Vec<Room>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let mut query = rooms::table
            .select(RoomRow::as_select())
            .order(rooms::number.asc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(rooms::status.eq(status.as_str()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_type_by_id(&self, id: Uuid) -> Result<Option<RoomType>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = room_types::table
            .find(id)
            .select(RoomTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(RoomType::from))
    }

    async fn create_type(&self, room_type: &RoomType) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = RoomTypeRow::from(room_type);
        diesel::insert_into(room_types::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_types(&self) -> Result<Vec<RoomType>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows = room_types::table
            .select(RoomTypeRow::as_select())
            .order(room_types::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(RoomType::from).collect())
    }
}
