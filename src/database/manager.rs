use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Migrate(#[from] MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map "no rows" to `NotFound(what)`, keeping every other failure as-is.
    pub fn not_found_or(err: sqlx::Error, what: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound(what.to_string()),
            other => DatabaseError::Sqlx(other),
        }
    }

    /// Map a unique-constraint violation to `Conflict(what)`.
    pub fn conflict_or(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::Conflict(what.to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Open the connection pool and verify it with a ping.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(&config.url)
        .await?;

    ping(&pool).await?;
    info!("Connected to database (max_connections={})", config.max_connections);
    Ok(pool)
}

pub async fn ping(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply every pending migration.
pub async fn migrate_up(pool: &PgPool) -> Result<(), DatabaseError> {
    MIGRATOR.run(pool).await?;
    info!("Migrations applied");
    Ok(())
}

/// Revert every applied migration.
pub async fn migrate_down(pool: &PgPool) -> Result<(), DatabaseError> {
    MIGRATOR.undo(pool, 0).await?;
    info!("Migrations reverted");
    Ok(())
}
