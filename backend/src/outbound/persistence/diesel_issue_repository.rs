//! PostgreSQL-backed `IssueRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::issue::{Issue, IssueFilter};
use crate::domain::ports::{IssueRepository, PersistenceError};

use super::diesel_helpers::map_diesel_error;
use super::models::IssueRow;
use super::pool::DbPool;
use super::schema::issues;

/// Diesel-backed implementation of the `IssueRepository` port.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn create(&self, issue: &Issue) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = IssueRow::from(issue);
        diesel::insert_into(issues::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, issue: &Issue) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = IssueRow::from(issue);
        diesel::update(issues::table.find(issue.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        issues::table
            .find(id)
            .select(IssueRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Issue::try_from)
            .transpose()
    }

    async fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let mut query = issues::table
            .select(IssueRow::as_select())
            .order(issues::created_at.desc())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(issues::status.eq(status.as_str()));
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(issues::department_id.eq(department_id));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(issues::priority.eq(priority.as_str()));
        }
        if let Some(reporter) = filter.reporter {
            query = query
                .filter(issues::reporter_kind.eq(reporter.kind_str()))
                .filter(issues::reporter_id.eq(reporter.reporter_id()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(Issue::try_from).collect()
    }

    async fn any_for_department(&self, department_id: Uuid) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::select(exists(
            issues::table.filter(issues::department_id.eq(department_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
