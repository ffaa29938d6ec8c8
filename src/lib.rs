//! PlayMate Volleyball
//!
//! Organizes drop-in volleyball sessions: event creation, RSVPs with a
//! capacity-bounded attendee list and FIFO waitlist, check-in, and attendee
//! export. Records live in PostgreSQL or, in demo mode, in memory.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PlayMateError, Result, StoreError};

// Re-export main components for easy access
pub use services::{AdmissionController, ServiceFactory};
pub use store::{EventStore, MemoryEventStore, SharedEventStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
