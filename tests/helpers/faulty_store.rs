//! Store wrapper that injects failures and slow reads

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use playmate::models::{Attendee, CreateEventRequest, Event, WaitlistEntry};
use playmate::{EventStore, MemoryEventStore, PlayMateError, Result, StoreError};

/// Delegates to [`MemoryEventStore`] but keeps the trait's default
/// `promote_waitlist_entry`, so the generic insert-then-delete path is used.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryEventStore,
    fail_attendee_inserts: AtomicBool,
    attendee_read_delay: Option<Duration>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `list_attendees` call sleeps first
    pub fn with_attendee_read_delay(mut self, delay: Duration) -> Self {
        self.attendee_read_delay = Some(delay);
        self
    }

    pub fn fail_attendee_inserts(&self, fail: bool) {
        self.fail_attendee_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventStore for FaultyStore {
    fn backend(&self) -> &'static str {
        "faulty"
    }

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.inner.insert_event(request).await
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
        self.inner.get_event(event_id).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.inner.list_events().await
    }

    async fn insert_attendee(&self, event_id: Uuid, name: &str) -> Result<Attendee> {
        if self.fail_attendee_inserts.load(Ordering::SeqCst) {
            return Err(PlayMateError::Store(StoreError::Unavailable(
                "attendee insert refused".to_string(),
            )));
        }
        self.inner.insert_attendee(event_id, name).await
    }

    async fn update_attendee_checked_in(&self, attendee_id: Uuid, checked_in: bool) -> Result<Option<Attendee>> {
        self.inner.update_attendee_checked_in(attendee_id, checked_in).await
    }

    async fn delete_attendee(&self, attendee_id: Uuid) -> Result<bool> {
        self.inner.delete_attendee(attendee_id).await
    }

    async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<Attendee>> {
        if let Some(delay) = self.attendee_read_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.list_attendees(event_id).await
    }

    async fn insert_waitlist_entry(&self, event_id: Uuid, name: &str) -> Result<WaitlistEntry> {
        self.inner.insert_waitlist_entry(event_id, name).await
    }

    async fn delete_waitlist_entry(&self, entry_id: Uuid) -> Result<bool> {
        self.inner.delete_waitlist_entry(entry_id).await
    }

    async fn list_waitlist(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>> {
        self.inner.list_waitlist(event_id).await
    }
}
