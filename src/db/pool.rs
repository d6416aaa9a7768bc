//! Postgres connection pool construction.

use crate::config::{ConfigError, DatabaseConfig};
use crate::utils::fmt_duration;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

const IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 2);
const MAX_LIFETIME: Duration = Duration::from_secs(60 * 30);
const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_secs(1);

/// Build the process-wide pool.
///
/// Connections are opened on first use, so the server can start (and keep
/// serving `/`) while the database is unreachable.
pub fn create_pool(config: &DatabaseConfig) -> Result<PgPool, ConfigError> {
    let connect_options = config
        .connect_options()?
        .log_statements(tracing::log::LevelFilter::Debug)
        .log_slow_statements(tracing::log::LevelFilter::Warn, SLOW_STATEMENT_THRESHOLD);

    let pool = PgPoolOptions::new()
        .min_connections(0)
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect_lazy_with(connect_options);

    info!(
        target_db = %config.display_target(),
        max_connections = config.db_max_connections,
        acquire_timeout = fmt_duration(config.db_acquire_timeout),
        idle_timeout = "2m",
        max_lifetime = "30m",
        "database pool configured"
    );

    Ok(pool)
}
