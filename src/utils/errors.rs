//! Error handling for PlayMate
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for PlayMate
#[derive(Error, Debug)]
pub enum PlayMateError {
    #[error("Event store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Attendee {attendee_id} not found for event {event_id}")]
    AttendeeNotFound { event_id: Uuid, attendee_id: Uuid },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Failures raised by an event store backend.
///
/// These are opaque to the admission logic and are passed through to the
/// caller unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for PlayMateError {
    fn from(e: sqlx::Error) -> Self {
        PlayMateError::Store(StoreError::Database(e))
    }
}

impl From<sqlx::migrate::MigrateError> for PlayMateError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        PlayMateError::Store(StoreError::Migration(e))
    }
}

impl From<config::ConfigError> for PlayMateError {
    fn from(e: config::ConfigError) -> Self {
        PlayMateError::Config(e.to_string())
    }
}

/// Result type alias for PlayMate operations
pub type Result<T> = std::result::Result<T, PlayMateError>;

impl PlayMateError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PlayMateError::Store(StoreError::Database(_)) => true,
            PlayMateError::Store(StoreError::Migration(_)) => false,
            PlayMateError::Store(StoreError::Unavailable(_)) => true,
            PlayMateError::Config(_) => false,
            PlayMateError::EventNotFound { .. } => false,
            PlayMateError::AttendeeNotFound { .. } => false,
            PlayMateError::InvalidInput(_) => false,
            PlayMateError::Csv(_) => false,
            PlayMateError::Io(_) => true,
            PlayMateError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlayMateError::Store(StoreError::Migration(_)) => ErrorSeverity::Critical,
            PlayMateError::Config(_) => ErrorSeverity::Critical,
            PlayMateError::EventNotFound { .. } => ErrorSeverity::Warning,
            PlayMateError::AttendeeNotFound { .. } => ErrorSeverity::Warning,
            PlayMateError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
