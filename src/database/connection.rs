//! Pool setup, migrations and health checks for the PostgreSQL store

use std::time::Duration;

use sqlx::postgres::{PgPoolOptions, Postgres};
use sqlx::Pool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::utils::errors::{PlayMateError, StoreError};

pub type DatabasePool = Pool<Postgres>;

/// Pool options derived from the `[database]` settings section
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(
            (config.idle_timeout_seconds > 0).then(|| Duration::from_secs(config.idle_timeout_seconds)),
        )
}

/// Connect to the configured database.
///
/// A database that cannot be reached is reported as
/// [`StoreError::Unavailable`] without echoing the URL, which may carry
/// credentials.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, PlayMateError> {
    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| StoreError::Unavailable(format!("cannot connect to PostgreSQL: {}", e)))?;

    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), PlayMateError> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), PlayMateError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
