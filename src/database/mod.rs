//! Database module
//!
//! This module handles the PostgreSQL-backed event store

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, health_check, pool_options, run_migrations};
pub use repositories::{EventRepository, AttendeeRepository, WaitlistRepository};
pub use service::PostgresEventStore;
