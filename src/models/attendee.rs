//! Attendee and waitlist models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Attendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}

/// A player queued for a full event. Entries are served oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    pub fn new(event_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name: name.into(),
            checked_in: false,
            created_at: Utc::now(),
        }
    }
}

impl WaitlistEntry {
    pub fn new(event_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Result of an RSVP request
#[derive(Debug, Clone, PartialEq)]
pub enum RsvpOutcome {
    Confirmed(Attendee),
    /// `position` is 1-based and counted when the entry was queued
    Waitlisted { entry: WaitlistEntry, position: usize },
    /// Capacity reached and the event has no waitlist
    Rejected,
}

impl RsvpOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RsvpOutcome::Confirmed(_) => "confirmed",
            RsvpOutcome::Waitlisted { .. } => "waitlisted",
            RsvpOutcome::Rejected => "rejected",
        }
    }
}

/// Figures shown on the organizer's admin panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventStats {
    pub capacity: i32,
    pub attendee_count: usize,
    pub waitlist_length: usize,
    pub spots_remaining: usize,
    pub check_in_count: usize,
    pub projected_revenue: f64,
}
