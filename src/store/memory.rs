//! In-memory event store
//!
//! Keeps every record in insertion-ordered vectors. Used when no database is
//! configured and by the test suite.

use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EventStore;
use crate::models::{Attendee, CreateEventRequest, Event, WaitlistEntry};
use crate::utils::errors::Result;
use crate::utils::logging::log_store_operation;

#[derive(Default)]
struct MemoryState {
    events: Vec<Event>,
    attendees: Vec<Attendee>,
    waitlist: Vec<WaitlistEntry>,
}

/// Event store backed by process memory
#[derive(Default)]
pub struct MemoryEventStore {
    state: RwLock<MemoryState>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(operation: &str, started: Instant) {
        log_store_operation("memory", operation, started.elapsed().as_millis() as u64, true);
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event> {
        let started = Instant::now();
        let event = request.into_event();
        self.state.write().await.events.push(event.clone());
        Self::record("insert_event", started);
        Ok(event)
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
        let state = self.state.read().await;
        Ok(state.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.state.read().await.events.clone())
    }

    async fn insert_attendee(&self, event_id: Uuid, name: &str) -> Result<Attendee> {
        let started = Instant::now();
        let attendee = Attendee::new(event_id, name);
        self.state.write().await.attendees.push(attendee.clone());
        Self::record("insert_attendee", started);
        Ok(attendee)
    }

    async fn update_attendee_checked_in(&self, attendee_id: Uuid, checked_in: bool) -> Result<Option<Attendee>> {
        let started = Instant::now();
        let mut state = self.state.write().await;
        let updated = state
            .attendees
            .iter_mut()
            .find(|a| a.id == attendee_id)
            .map(|attendee| {
                attendee.checked_in = checked_in;
                attendee.clone()
            });
        Self::record("update_attendee", started);
        Ok(updated)
    }

    async fn delete_attendee(&self, attendee_id: Uuid) -> Result<bool> {
        let started = Instant::now();
        let mut state = self.state.write().await;
        let before = state.attendees.len();
        state.attendees.retain(|a| a.id != attendee_id);
        Self::record("delete_attendee", started);
        Ok(state.attendees.len() != before)
    }

    async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<Attendee>> {
        let state = self.state.read().await;
        Ok(state
            .attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn insert_waitlist_entry(&self, event_id: Uuid, name: &str) -> Result<WaitlistEntry> {
        let started = Instant::now();
        let entry = WaitlistEntry::new(event_id, name);
        self.state.write().await.waitlist.push(entry.clone());
        Self::record("insert_waitlist_entry", started);
        Ok(entry)
    }

    async fn delete_waitlist_entry(&self, entry_id: Uuid) -> Result<bool> {
        let started = Instant::now();
        let mut state = self.state.write().await;
        let before = state.waitlist.len();
        state.waitlist.retain(|w| w.id != entry_id);
        Self::record("delete_waitlist_entry", started);
        Ok(state.waitlist.len() != before)
    }

    async fn promote_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<Option<Attendee>> {
        let started = Instant::now();
        let mut state = self.state.write().await;
        let Some(index) = state.waitlist.iter().position(|w| w.id == entry.id) else {
            return Ok(None);
        };

        let entry = state.waitlist.remove(index);
        let attendee = Attendee::new(entry.event_id, entry.name);
        state.attendees.push(attendee.clone());
        Self::record("promote_waitlist_entry", started);
        Ok(Some(attendee))
    }

    async fn list_waitlist(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>> {
        let state = self.state.read().await;
        Ok(state
            .waitlist
            .iter()
            .filter(|w| w.event_id == event_id)
            .cloned()
            .collect())
    }
}
