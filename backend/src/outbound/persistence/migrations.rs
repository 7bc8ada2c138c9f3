//! Embedded schema migrations applied at startup.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending schema migrations.
///
/// Uses a dedicated synchronous connection; migrations run once at startup
/// before the pool begins serving requests.
///
/// # Errors
///
/// Returns [`PersistenceError::Connection`] if the database is unreachable
/// and [`PersistenceError::Query`] if a migration fails to apply.
pub fn run_migrations(database_url: &str) -> Result<(), PersistenceError> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|err| PersistenceError::connection(err.to_string()))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::query(err.to_string()))?;
    for version in &applied {
        info!(%version, "applied schema migration");
    }
    Ok(())
}
