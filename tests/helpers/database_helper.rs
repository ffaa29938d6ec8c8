//! Test database helper utilities
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a database.

use playmate::config::DatabaseConfig;
use playmate::database::{connection, DatabasePool, PostgresEventStore};

/// Test database helper that manages PostgreSQL test database setup
pub struct TestDatabase {
    pub pool: DatabasePool,
    pub store: PostgresEventStore,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no test database is configured
    pub async fn from_env() -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let config = DatabaseConfig {
            url,
            max_connections: 5,
            ..DatabaseConfig::default()
        };

        let pool = connection::create_pool(&config)
            .await
            .expect("Failed to connect to TEST_DATABASE_URL");
        connection::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            store: PostgresEventStore::new(pool.clone()),
            pool,
        })
    }
}
