//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::{Settings, StoreBackend};
use crate::utils::errors::{PlayMateError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.store.backend == StoreBackend::Postgres {
        validate_database_config(&settings.database)?;
    }
    validate_event_defaults(&settings.defaults)?;
    validate_display_config(&settings.display)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(PlayMateError::Config(
            "Database URL is required for the postgres backend".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(PlayMateError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(PlayMateError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate organizer form defaults
fn validate_event_defaults(config: &super::EventDefaults) -> Result<()> {
    if config.capacity <= 0 {
        return Err(PlayMateError::Config(
            "Default capacity must be greater than 0".to_string(),
        ));
    }

    if config.courts <= 0 {
        return Err(PlayMateError::Config(
            "Default court count must be greater than 0".to_string(),
        ));
    }

    if !config.price.is_finite() || config.price < 0.0 {
        return Err(PlayMateError::Config(
            "Default price must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}

/// Validate display configuration
fn validate_display_config(config: &super::DisplayConfig) -> Result<()> {
    if config.timezone.parse::<chrono_tz::Tz>().is_err() {
        return Err(PlayMateError::Config(format!(
            "Unknown timezone: {}",
            config.timezone
        )));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PlayMateError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PlayMateError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut settings = Settings::default();
        settings.store.backend = StoreBackend::Postgres;
        assert!(matches!(validate_settings(&settings), Err(PlayMateError::Config(_))));

        settings.database.url = "postgresql://localhost/playmate".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = Settings::default();
        settings.store.backend = StoreBackend::Postgres;
        settings.database.url = "postgresql://localhost/playmate".to_string();
        settings.database.min_connections = 20;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_bad_defaults() {
        let mut settings = Settings::default();
        settings.defaults.capacity = 0;
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.defaults.price = -1.0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_unknown_timezone_and_level() {
        let mut settings = Settings::default();
        settings.display.timezone = "Nowhere/Special".to_string();
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
