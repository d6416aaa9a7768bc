//! Database client: the trait the web layer talks to, and its Postgres implementation.

pub mod pool;
pub mod row;

use async_trait::async_trait;
use sqlx::PgPool;

pub use pool::create_pool;
pub use row::Row;

/// Errors surfaced by the database client.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Query access to a relational database.
///
/// Handlers only see this trait, so tests can substitute a double for the pool.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement and return every row it produced.
    async fn query(&self, sql: &str) -> Result<Vec<Row>, DbError>;

    /// Verify the database connection is alive.
    async fn ping(&self) -> Result<(), DbError>;

    /// Release pooled connections. Subsequent queries fail.
    async fn close(&self);
}

/// [`Database`] backed by a sqlx Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn query(&self, sql: &str) -> Result<Vec<Row>, DbError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row::to_json).collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
