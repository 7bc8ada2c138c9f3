//! PostgreSQL-backed `StaffRepository` implementation using Diesel.
//!
//! A partial unique index on `staff.role_id` keeps each role assigned to at
//! most one staff member; violating it surfaces as a conflict.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PersistenceError, StaffRepository};
use crate::domain::staff::Staff;

use super::diesel_helpers::map_diesel_error;
use super::models::StaffRow;
use super::pool::DbPool;
use super::schema::staff;

/// Diesel-backed implementation of the `StaffRepository` port.
#[derive(Clone)]
pub struct DieselStaffRepository {
    pool: DbPool,
}

impl DieselStaffRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for DieselStaffRepository {
    async fn create(&self, record: &Staff) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = StaffRow::from(record);
        diesel::insert_into(staff::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = staff::table
            .find(id)
            .select(StaffRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Staff::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = staff::table
            .filter(staff::username.eq(username))
            .select(StaffRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Staff::from))
    }

    async fn find_by_role(&self, role_id: Uuid) -> Result<Option<Staff>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = staff::table
            .filter(staff::role_id.eq(role_id))
            .select(StaffRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Staff::from))
    }

    async fn set_role(
        &self,
        staff_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(staff::table.find(staff_id))
            .set((staff::role_id.eq(role_id), staff::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(PersistenceError::query("staff record not found"));
        }
        Ok(())
    }
}
