//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    pub database: DatabaseConfig,
    pub admission: AdmissionConfig,
    pub defaults: EventDefaults,
    pub display: DisplayConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Which event store backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

/// Event store selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Insert the demo event when the store starts empty
    pub seed_demo_event: bool,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Idle connections are closed after this many seconds; 0 keeps them open
    pub idle_timeout_seconds: u64,
}

/// Admission controller configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Serialize check-then-insert sequences per event inside this process
    pub serialize_per_event: bool,
}

/// Values used when the organizer leaves a form field blank
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventDefaults {
    pub title: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
    pub courts: i32,
    pub price: f64,
    pub contact: String,
}

/// Display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA timezone used for form input and rendered dates
    pub timezone: String,
}

/// CSV export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("PLAYMATE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PlayMateError> {
        super::validation::validate_settings(self)
    }

    /// Parsed display timezone, UTC when the name is unknown
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.display.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            seed_demo_event: true,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            serialize_per_event: true,
        }
    }
}

impl Default for EventDefaults {
    fn default() -> Self {
        Self {
            title: "Drop-in Volleyball".to_string(),
            location: "Montréal".to_string(),
            latitude: 45.5017,
            longitude: -73.5673,
            capacity: 24,
            courts: 3,
            price: 12.0,
            contact: "514-241-0316".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Toronto".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
