mod notes;
mod projects;
mod tasks;
mod users;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{self, DatabaseError};
use crate::database::store::Store;

/// `Store` over a Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        manager::ping(&self.pool).await
    }
}
