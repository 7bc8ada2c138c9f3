//! PostgreSQL-backed `RoleRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PersistenceError, RoleRepository};
use crate::domain::role::Role;

use super::diesel_helpers::map_diesel_error;
use super::models::RoleRow;
use super::pool::DbPool;
use super::schema::roles;

/// Diesel-backed implementation of the `RoleRepository` port.
#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn create(&self, role: &Role) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = RoleRow::from(role);
        diesel::insert_into(roles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = RoleRow::from(role);
        diesel::update(roles::table.find(role.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::delete(roles::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        roles::table
            .find(id)
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Role::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        roles::table
            .filter(roles::name.eq(name))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Role::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Role>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows = roles::table
            .select(RoleRow::as_select())
            .order(roles::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Role::try_from).collect()
    }
}
