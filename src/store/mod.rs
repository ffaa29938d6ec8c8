//! Event store abstraction
//!
//! Events, attendees and waitlist entries live behind the [`EventStore`]
//! trait. Two implementations exist: [`MemoryEventStore`] for demo mode and
//! tests, and [`crate::database::PostgresEventStore`] for a hosted database.
//! The backend is chosen once at startup by [`open_store`].

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Settings, StoreBackend};
use crate::database::{connection, PostgresEventStore};
use crate::models::{Attendee, CreateEventRequest, Event, WaitlistEntry};
use crate::utils::errors::Result;

pub use memory::MemoryEventStore;

/// Shared handle to the configured store
pub type SharedEventStore = Arc<dyn EventStore>;

/// Persistence verbs the admission logic depends on.
///
/// Listing methods filter by event id. `list_waitlist` must return entries
/// in insertion order.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Short backend name used in logs
    fn backend(&self) -> &'static str;

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event>;
    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>>;
    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn insert_attendee(&self, event_id: Uuid, name: &str) -> Result<Attendee>;
    /// Returns `None` when no attendee has this id
    async fn update_attendee_checked_in(&self, attendee_id: Uuid, checked_in: bool) -> Result<Option<Attendee>>;
    /// Returns `false` when no attendee has this id
    async fn delete_attendee(&self, attendee_id: Uuid) -> Result<bool>;
    async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<Attendee>>;

    async fn insert_waitlist_entry(&self, event_id: Uuid, name: &str) -> Result<WaitlistEntry>;
    async fn delete_waitlist_entry(&self, entry_id: Uuid) -> Result<bool>;
    async fn list_waitlist(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>>;

    /// Turn a waitlist entry into a confirmed attendee.
    ///
    /// The attendee is written before the entry is removed, so a failed
    /// insert leaves the player queued. Returns `None` when the entry no
    /// longer exists. Backends that can do both writes atomically override this.
    async fn promote_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<Option<Attendee>> {
        let attendee = self.insert_attendee(entry.event_id, &entry.name).await?;

        match self.delete_waitlist_entry(entry.id).await {
            Ok(true) => Ok(Some(attendee)),
            Ok(false) => {
                self.delete_attendee(attendee.id).await?;
                Ok(None)
            }
            Err(e) => {
                if let Err(rollback) = self.delete_attendee(attendee.id).await {
                    warn!(attendee_id = %attendee.id, error = %rollback, "Failed to undo promotion");
                }
                Err(e)
            }
        }
    }
}

/// Open the store selected by configuration
pub async fn open_store(settings: &Settings) -> Result<SharedEventStore> {
    match settings.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory event store (demo mode, nothing is persisted)");
            Ok(Arc::new(MemoryEventStore::new()))
        }
        StoreBackend::Postgres => {
            info!("Connecting to PostgreSQL event store...");
            let pool = connection::create_pool(&settings.database).await?;
            connection::run_migrations(&pool).await?;
            Ok(Arc::new(PostgresEventStore::new(pool)))
        }
    }
}
