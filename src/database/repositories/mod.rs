//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod attendee;
pub mod waitlist;

// Re-export repositories
pub use event::EventRepository;
pub use attendee::AttendeeRepository;
pub use waitlist::WaitlistRepository;
