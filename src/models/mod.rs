//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod attendee;

// Re-export commonly used models
pub use event::{Event, CreateEventRequest, SkillLevel, UnknownSkillLevel};
pub use attendee::{Attendee, WaitlistEntry, RsvpOutcome, EventStats};
