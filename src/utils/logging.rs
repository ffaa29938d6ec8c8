//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the PlayMate application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::models::RsvpOutcome;
use crate::utils::errors::{PlayMateError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| PlayMateError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "playmate.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PlayMateError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log the outcome of an RSVP request
pub fn log_admission_decision(event_id: Uuid, name: &str, outcome: &RsvpOutcome) {
    match outcome {
        RsvpOutcome::Confirmed(attendee) => info!(
            event_id = %event_id,
            attendee_id = %attendee.id,
            name = name,
            "RSVP confirmed"
        ),
        RsvpOutcome::Waitlisted { entry, position } => info!(
            event_id = %event_id,
            entry_id = %entry.id,
            position = position,
            name = name,
            "RSVP waitlisted"
        ),
        RsvpOutcome::Rejected => warn!(
            event_id = %event_id,
            name = name,
            "RSVP rejected: capacity reached and waitlist disabled"
        ),
    }
}

/// Log attendee management actions
pub fn log_attendee_action(event_id: Uuid, attendee_id: Uuid, action: &str, details: Option<&str>) {
    info!(
        event_id = %event_id,
        attendee_id = %attendee_id,
        action = action,
        details = details,
        "Attendee action performed"
    );
}

/// Log event creation
pub fn log_event_created(event_id: Uuid, title: &str, capacity: i32) {
    info!(
        event_id = %event_id,
        title = title,
        capacity = capacity,
        "Event created"
    );
}

/// Log store operations
pub fn log_store_operation(backend: &str, operation: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            backend = backend,
            operation = operation,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            backend = backend,
            operation = operation,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}
