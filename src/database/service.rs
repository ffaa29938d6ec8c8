//! PostgreSQL event store
//!
//! Bundles the repositories behind the [`EventStore`] trait.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::{AttendeeRepository, DatabasePool, EventRepository, WaitlistRepository};
use crate::models::{Attendee, CreateEventRequest, Event, WaitlistEntry};
use crate::store::EventStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_store_operation;

#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pub events: EventRepository,
    pub attendees: AttendeeRepository,
    pub waitlist: WaitlistRepository,
    pool: DatabasePool,
}

impl PostgresEventStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            attendees: AttendeeRepository::new(pool.clone()),
            waitlist: WaitlistRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the database answers
    pub async fn health_check(&self) -> Result<()> {
        super::health_check(&self.pool).await
    }

    async fn timed<T, F>(operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = fut.await;
        log_store_operation(
            "postgres",
            operation,
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        result
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert_event(&self, request: CreateEventRequest) -> Result<Event> {
        Self::timed("insert_event", self.events.create(request)).await
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
        Self::timed("get_event", self.events.find_by_id(event_id)).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        Self::timed("list_events", self.events.list()).await
    }

    async fn insert_attendee(&self, event_id: Uuid, name: &str) -> Result<Attendee> {
        Self::timed("insert_attendee", self.attendees.create(event_id, name)).await
    }

    async fn update_attendee_checked_in(&self, attendee_id: Uuid, checked_in: bool) -> Result<Option<Attendee>> {
        Self::timed(
            "update_attendee",
            self.attendees.set_checked_in(attendee_id, checked_in),
        )
        .await
    }

    async fn delete_attendee(&self, attendee_id: Uuid) -> Result<bool> {
        Self::timed("delete_attendee", self.attendees.delete(attendee_id)).await
    }

    async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<Attendee>> {
        Self::timed("list_attendees", self.attendees.list_for_event(event_id)).await
    }

    async fn insert_waitlist_entry(&self, event_id: Uuid, name: &str) -> Result<WaitlistEntry> {
        Self::timed("insert_waitlist_entry", self.waitlist.push(event_id, name)).await
    }

    async fn delete_waitlist_entry(&self, entry_id: Uuid) -> Result<bool> {
        Self::timed("delete_waitlist_entry", self.waitlist.delete(entry_id)).await
    }

    async fn list_waitlist(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>> {
        Self::timed("list_waitlist", self.waitlist.list_for_event(event_id)).await
    }

    async fn promote_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<Option<Attendee>> {
        Self::timed("promote_waitlist_entry", self.waitlist.promote(entry)).await
    }
}
