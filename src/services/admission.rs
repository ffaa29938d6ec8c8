//! Admission controller
//!
//! Decides whether an RSVP is confirmed, waitlisted or rejected, and moves
//! players from the waitlist into confirmed attendance on request.
//!
//! Capacity checks read the store and then write to it. With
//! `serialize_per_event` enabled, every such sequence for the same event runs
//! under one async mutex, so the attendee count never exceeds capacity within
//! this process. Without it, concurrent RSVPs may overshoot capacity by at
//! most the number of racing requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;
use tracing::debug;
use uuid::Uuid;

use crate::config::AdmissionConfig;
use crate::models::{Attendee, Event, EventStats, RsvpOutcome, WaitlistEntry};
use crate::store::SharedEventStore;
use crate::utils::errors::{PlayMateError, Result};
use crate::utils::logging::{log_admission_decision, log_attendee_action};

type EventLocks = Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>;

#[derive(Clone)]
pub struct AdmissionController {
    store: SharedEventStore,
    locks: EventLocks,
    serialize_per_event: bool,
}

impl AdmissionController {
    pub fn new(store: SharedEventStore, config: &AdmissionConfig) -> Self {
        Self {
            store,
            locks: Arc::new(Mutex::new(HashMap::new())),
            serialize_per_event: config.serialize_per_event,
        }
    }

    /// Resolve an event and, when serialization is enabled, hold its guard.
    ///
    /// Locks are created only for events that exist, so the lock table is
    /// bounded by the number of events. Events are immutable once created,
    /// so reading one before taking the guard is safe.
    async fn lock_event(&self, event_id: Uuid) -> Result<(Event, Option<OwnedMutexGuard<()>>)> {
        let event = self.require_event(event_id).await?;
        if !self.serialize_per_event {
            return Ok((event, None));
        }

        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.entry(event_id).or_default().clone()
        };
        Ok((event, Some(lock.lock_owned().await)))
    }

    async fn require_event(&self, event_id: Uuid) -> Result<Event> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or(PlayMateError::EventNotFound { event_id })
    }

    async fn find_attendee(&self, event: &Event, attendee_id: Uuid) -> Result<Attendee> {
        self.store
            .list_attendees(event.id)
            .await?
            .into_iter()
            .find(|a| a.id == attendee_id)
            .ok_or(PlayMateError::AttendeeNotFound { event_id: event.id, attendee_id })
    }

    /// Admit, waitlist or reject a player for an event
    pub async fn request_rsvp(&self, event_id: Uuid, name: &str) -> Result<RsvpOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayMateError::InvalidInput("Player name is required".to_string()));
        }

        let (event, _guard) = self.lock_event(event_id).await?;
        let current = self.store.list_attendees(event_id).await?.len();

        let outcome = if current < capacity_of(&event) {
            RsvpOutcome::Confirmed(self.store.insert_attendee(event_id, name).await?)
        } else if event.waitlist_enabled {
            let entry = self.store.insert_waitlist_entry(event_id, name).await?;
            let queue = self.store.list_waitlist(event_id).await?;
            let position = queue
                .iter()
                .position(|w| w.id == entry.id)
                .map_or(queue.len(), |index| index + 1);
            RsvpOutcome::Waitlisted { entry, position }
        } else {
            RsvpOutcome::Rejected
        };

        log_admission_decision(event_id, name, &outcome);
        Ok(outcome)
    }

    /// Flip an attendee's check-in flag
    pub async fn toggle_check_in(&self, event_id: Uuid, attendee_id: Uuid) -> Result<Attendee> {
        let (event, _guard) = self.lock_event(event_id).await?;
        let attendee = self.find_attendee(&event, attendee_id).await?;
        let updated = self
            .store
            .update_attendee_checked_in(attendee_id, !attendee.checked_in)
            .await?
            .ok_or(PlayMateError::AttendeeNotFound { event_id, attendee_id })?;

        let action = if updated.checked_in { "check_in" } else { "undo_check_in" };
        log_attendee_action(event_id, attendee_id, action, Some(&updated.name));
        Ok(updated)
    }

    /// Remove an attendee. The freed spot is not filled from the waitlist.
    pub async fn remove_attendee(&self, event_id: Uuid, attendee_id: Uuid) -> Result<Attendee> {
        let (event, _guard) = self.lock_event(event_id).await?;
        let attendee = self.find_attendee(&event, attendee_id).await?;

        if !self.store.delete_attendee(attendee_id).await? {
            return Err(PlayMateError::AttendeeNotFound { event_id, attendee_id });
        }

        log_attendee_action(event_id, attendee_id, "remove", Some(&attendee.name));
        Ok(attendee)
    }

    /// Promote the head of the waitlist when a spot is open.
    ///
    /// Returns `None` without touching the store when the waitlist is empty or
    /// the event is full. Promotes at most one player per call. If the store
    /// fails, the player stays at the head of the waitlist.
    pub async fn promote_from_waitlist(&self, event_id: Uuid) -> Result<Option<Attendee>> {
        let (event, _guard) = self.lock_event(event_id).await?;

        let Some(head) = self.store.list_waitlist(event_id).await?.into_iter().next() else {
            debug!(event_id = %event_id, "Promotion skipped: waitlist is empty");
            return Ok(None);
        };

        let current = self.store.list_attendees(event_id).await?.len();
        if current >= capacity_of(&event) {
            debug!(event_id = %event_id, current = current, "Promotion skipped: event is full");
            return Ok(None);
        }

        let Some(attendee) = self.store.promote_waitlist_entry(&head).await? else {
            debug!(event_id = %event_id, entry_id = %head.id, "Promotion skipped: entry already left the waitlist");
            return Ok(None);
        };

        log_attendee_action(event_id, attendee.id, "promote", Some(&attendee.name));
        Ok(Some(attendee))
    }

    /// Confirmed attendees in RSVP order
    pub async fn attendees(&self, event_id: Uuid) -> Result<Vec<Attendee>> {
        self.store.list_attendees(event_id).await
    }

    /// Waitlisted players, head first
    pub async fn waitlist(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>> {
        self.store.list_waitlist(event_id).await
    }

    pub async fn attendee_count(&self, event_id: Uuid) -> Result<usize> {
        Ok(self.store.list_attendees(event_id).await?.len())
    }

    pub async fn waitlist_length(&self, event_id: Uuid) -> Result<usize> {
        Ok(self.store.list_waitlist(event_id).await?.len())
    }

    pub async fn spots_remaining(&self, event_id: Uuid) -> Result<usize> {
        Ok(self.stats(event_id).await?.spots_remaining)
    }

    pub async fn check_in_count(&self, event_id: Uuid) -> Result<usize> {
        let attendees = self.store.list_attendees(event_id).await?;
        Ok(attendees.iter().filter(|a| a.checked_in).count())
    }

    pub async fn projected_revenue(&self, event_id: Uuid) -> Result<f64> {
        Ok(self.stats(event_id).await?.projected_revenue)
    }

    /// All derived figures for an event, computed from one read of each list
    pub async fn stats(&self, event_id: Uuid) -> Result<EventStats> {
        let event = self.require_event(event_id).await?;
        let attendees = self.store.list_attendees(event_id).await?;
        let waitlist_length = self.store.list_waitlist(event_id).await?.len();

        let attendee_count = attendees.len();
        Ok(EventStats {
            capacity: event.capacity,
            attendee_count,
            waitlist_length,
            spots_remaining: capacity_of(&event).saturating_sub(attendee_count),
            check_in_count: attendees.iter().filter(|a| a.checked_in).count(),
            projected_revenue: attendee_count as f64 * event.price,
        })
    }
}

fn capacity_of(event: &Event) -> usize {
    usize::try_from(event.capacity).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateEventRequest, SkillLevel};
    use crate::store::{EventStore, MemoryEventStore};
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    async fn setup(capacity: i32, waitlist_enabled: bool) -> (AdmissionController, SharedEventStore, Uuid) {
        let store: SharedEventStore = Arc::new(MemoryEventStore::new());
        let start = Utc::now() + Duration::days(2);
        let event = store
            .insert_event(CreateEventRequest {
                title: "Drop-in Volleyball".to_string(),
                level: SkillLevel::AllLevels,
                location: "Gym".to_string(),
                latitude: 45.5,
                longitude: -73.5,
                start,
                finish: start + Duration::hours(2),
                capacity,
                courts: 2,
                price: 12.0,
                contact: String::new(),
                pay_in_person: true,
                waitlist_enabled,
                notes: String::new(),
            })
            .await
            .unwrap();
        let controller = AdmissionController::new(store.clone(), &AdmissionConfig::default());
        (controller, store, event.id)
    }

    #[tokio::test]
    async fn test_rsvp_confirms_until_full_then_waitlists() {
        let (controller, store, event_id) = setup(2, true).await;

        assert_matches!(controller.request_rsvp(event_id, "Ana").await, Ok(RsvpOutcome::Confirmed(a)) if a.name == "Ana" && !a.checked_in);
        assert_matches!(controller.request_rsvp(event_id, "Bo").await, Ok(RsvpOutcome::Confirmed(_)));
        assert_matches!(controller.request_rsvp(event_id, "Cy").await, Ok(RsvpOutcome::Waitlisted { entry, position: 1 }) if entry.name == "Cy");

        assert_eq!(controller.attendee_count(event_id).await.unwrap(), 2);
        assert_eq!(store.list_waitlist(event_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rsvp_rejected_without_waitlist() {
        let (controller, store, event_id) = setup(1, false).await;

        controller.request_rsvp(event_id, "Ana").await.unwrap();
        assert_matches!(controller.request_rsvp(event_id, "Bo").await, Ok(RsvpOutcome::Rejected));

        assert_eq!(store.list_attendees(event_id).await.unwrap().len(), 1);
        assert!(store.list_waitlist(event_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rsvp_trims_and_validates_name() {
        let (controller, _, event_id) = setup(2, true).await;

        assert_matches!(controller.request_rsvp(event_id, "   ").await, Err(PlayMateError::InvalidInput(_)));
        assert_matches!(controller.request_rsvp(event_id, "  Ana  ").await, Ok(RsvpOutcome::Confirmed(a)) if a.name == "Ana");
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let (controller, _, _) = setup(2, true).await;
        let missing = Uuid::new_v4();

        assert_matches!(controller.request_rsvp(missing, "Ana").await, Err(PlayMateError::EventNotFound { event_id }) if event_id == missing);
        assert_matches!(controller.promote_from_waitlist(missing).await, Err(PlayMateError::EventNotFound { .. }));
    }

    #[tokio::test]
    async fn test_toggle_check_in_twice_restores_state() {
        let (controller, _, event_id) = setup(2, true).await;
        let RsvpOutcome::Confirmed(ana) = controller.request_rsvp(event_id, "Ana").await.unwrap() else {
            panic!("expected confirmation");
        };

        assert!(controller.toggle_check_in(event_id, ana.id).await.unwrap().checked_in);
        assert_eq!(controller.check_in_count(event_id).await.unwrap(), 1);
        assert!(!controller.toggle_check_in(event_id, ana.id).await.unwrap().checked_in);
        assert_eq!(controller.check_in_count(event_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_attendee_must_belong_to_event() {
        let (controller, store, event_id) = setup(2, true).await;
        let (_, _, other_event) = setup(2, true).await;
        let stranger = store.insert_attendee(other_event, "Zed").await.unwrap();

        assert_matches!(
            controller.toggle_check_in(event_id, stranger.id).await,
            Err(PlayMateError::AttendeeNotFound { .. })
        );
        assert_matches!(
            controller.remove_attendee(event_id, Uuid::new_v4()).await,
            Err(PlayMateError::AttendeeNotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_promote_is_noop_when_full_or_empty() {
        let (controller, store, event_id) = setup(1, true).await;

        assert_eq!(controller.promote_from_waitlist(event_id).await.unwrap(), None);

        controller.request_rsvp(event_id, "Ana").await.unwrap();
        controller.request_rsvp(event_id, "Bo").await.unwrap();
        assert_eq!(controller.promote_from_waitlist(event_id).await.unwrap(), None);
        assert_eq!(store.list_waitlist(event_id).await.unwrap().len(), 1);
        assert_eq!(controller.attendee_count(event_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_promote_takes_one_from_head() {
        let (controller, _, event_id) = setup(1, true).await;
        let RsvpOutcome::Confirmed(ana) = controller.request_rsvp(event_id, "Ana").await.unwrap() else {
            panic!("expected confirmation");
        };
        controller.request_rsvp(event_id, "Bo").await.unwrap();
        controller.request_rsvp(event_id, "Cy").await.unwrap();

        controller.remove_attendee(event_id, ana.id).await.unwrap();
        assert_eq!(controller.waitlist_length(event_id).await.unwrap(), 2);

        let promoted = controller.promote_from_waitlist(event_id).await.unwrap().unwrap();
        assert_eq!(promoted.name, "Bo");
        assert!(!promoted.checked_in);
        assert_eq!(controller.waitlist_length(event_id).await.unwrap(), 1);
        assert_eq!(controller.promote_from_waitlist(event_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stats() {
        let (controller, _, event_id) = setup(3, true).await;
        for name in ["Ana", "Bo", "Cy", "Di"] {
            controller.request_rsvp(event_id, name).await.unwrap();
        }

        let stats = controller.stats(event_id).await.unwrap();
        assert_eq!(stats.attendee_count, 3);
        assert_eq!(stats.waitlist_length, 1);
        assert_eq!(stats.spots_remaining, 0);
        assert_eq!(stats.check_in_count, 0);
        assert_eq!(stats.projected_revenue, 36.0);
        assert_eq!(controller.spots_remaining(event_id).await.unwrap(), 0);
        assert_eq!(controller.projected_revenue(event_id).await.unwrap(), 36.0);
    }

    #[tokio::test]
    async fn test_unknown_events_do_not_create_locks() {
        let (controller, _, event_id) = setup(2, true).await;

        for _ in 0..100 {
            assert_matches!(
                controller.request_rsvp(Uuid::new_v4(), "Ana").await,
                Err(PlayMateError::EventNotFound { .. })
            );
        }
        assert!(controller.locks.lock().unwrap().is_empty());

        controller.request_rsvp(event_id, "Ana").await.unwrap();
        controller.request_rsvp(event_id, "Bo").await.unwrap();
        assert_eq!(controller.locks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_waitlist_position_counts_from_one() {
        let (controller, _, event_id) = setup(1, true).await;
        controller.request_rsvp(event_id, "Ana").await.unwrap();

        assert_matches!(controller.request_rsvp(event_id, "Bo").await, Ok(RsvpOutcome::Waitlisted { position: 1, .. }));
        assert_matches!(controller.request_rsvp(event_id, "Cy").await, Ok(RsvpOutcome::Waitlisted { position: 2, .. }));
    }
}
