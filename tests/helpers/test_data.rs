//! Test data helpers for creating test events

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use playmate::config::{AdmissionConfig, Settings};
use playmate::models::{CreateEventRequest, Event, SkillLevel};
use playmate::{AdmissionController, EventStore, MemoryEventStore, ServiceFactory, SharedEventStore};

/// Test event data with builder-style overrides
#[derive(Debug, Clone)]
pub struct TestEvent {
    pub title: String,
    pub capacity: i32,
    pub price: f64,
    pub waitlist_enabled: bool,
    pub level: SkillLevel,
}

impl TestEvent {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            capacity: 24,
            price: 12.0,
            waitlist_enabled: true,
            level: SkillLevel::AllLevels,
        }
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_waitlist(mut self, waitlist_enabled: bool) -> Self {
        self.waitlist_enabled = waitlist_enabled;
        self
    }

    pub fn with_level(mut self, level: SkillLevel) -> Self {
        self.level = level;
        self
    }

    pub fn request(&self) -> CreateEventRequest {
        let start = Utc.with_ymd_and_hms(2025, 10, 5, 22, 0, 0).unwrap();
        CreateEventRequest {
            title: self.title.clone(),
            level: self.level,
            location: "717 Rue Saint-Ferdinand, Montréal".to_string(),
            latitude: 45.4793,
            longitude: -73.5699,
            start,
            finish: start + Duration::hours(2),
            capacity: self.capacity,
            courts: 3,
            price: self.price,
            contact: "514-241-0316".to_string(),
            pay_in_person: true,
            waitlist_enabled: self.waitlist_enabled,
            notes: "Bring clean indoor shoes.".to_string(),
        }
    }

    /// Insert the event into a store
    pub async fn insert(&self, store: &SharedEventStore) -> Event {
        store
            .insert_event(self.request())
            .await
            .expect("Failed to insert test event")
    }
}

/// Fresh in-memory store
pub fn memory_store() -> SharedEventStore {
    Arc::new(MemoryEventStore::new())
}

/// Controller over a store with the given serialization mode
pub fn controller(store: &SharedEventStore, serialize_per_event: bool) -> AdmissionController {
    AdmissionController::new(store.clone(), &AdmissionConfig { serialize_per_event })
}

/// Services over a fresh in-memory store, exporting into `export_dir`
pub fn memory_services(export_dir: &std::path::Path) -> ServiceFactory {
    let mut settings = Settings::default();
    settings.export.output_dir = export_dir.display().to_string();
    ServiceFactory::new(memory_store(), &settings)
}
