//! Services module
//!
//! This module contains business logic services

pub mod admission;
pub mod event;
pub mod export;

// Re-export commonly used services
pub use admission::AdmissionController;
pub use event::{EventForm, EventService};
pub use export::{AttendeeRow, ExportService};

use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::store::SharedEventStore;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub admission: AdmissionController,
    pub events: EventService,
    pub export: ExportService,
    pub export_dir: PathBuf,
    store: SharedEventStore,
}

impl ServiceFactory {
    /// Create a new ServiceFactory over one shared store
    pub fn new(store: SharedEventStore, settings: &Settings) -> Self {
        Self {
            admission: AdmissionController::new(store.clone(), &settings.admission),
            events: EventService::new(store.clone(), settings),
            export: ExportService::new(store.clone(), settings.timezone()),
            export_dir: PathBuf::from(&settings.export.output_dir),
            store,
        }
    }

    /// Name of the backing store
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Whether records survive a restart
    pub fn is_persistent(&self) -> bool {
        self.backend() != "memory"
    }
}
