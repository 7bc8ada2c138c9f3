//! PostgreSQL-backed `DepartmentRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::department::Department;
use crate::domain::ports::{DepartmentRepository, PersistenceError};

use super::diesel_helpers::map_diesel_error;
use super::models::DepartmentRow;
use super::pool::DbPool;
use super::schema::departments;

/// Diesel-backed implementation of the `DepartmentRepository` port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn create(&self, department: &Department) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = DepartmentRow::from(department);
        diesel::insert_into(departments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, department: &Department) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = DepartmentRow::from(department);
        diesel::update(departments::table.find(department.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::delete(departments::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = departments::table
            .find(id)
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Department::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = departments::table
            .filter(departments::name.eq(name))
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Department::from))
    }

    async fn list(&self) -> Result<Vec<Department>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows = departments::table
            .select(DepartmentRow::as_select())
            .order(departments::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Department::from).collect())
    }
}
