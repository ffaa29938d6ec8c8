//! RSVP, check-in and waitlist command handlers

use crate::handlers::render::short_id;
use crate::models::RsvpOutcome;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

use super::{resolve_attendee, resolve_event};

/// Handle `rsvp <event> <name>`
pub async fn handle_rsvp(services: &ServiceFactory, reference: &str, name: &str) -> Result<String> {
    let event = resolve_event(services, reference).await?;
    let outcome = services.admission.request_rsvp(event.id, name).await?;

    let reply = match outcome {
        RsvpOutcome::Confirmed(attendee) => format!(
            "{} is confirmed for {} [{}]",
            attendee.name,
            event.title,
            short_id(attendee.id)
        ),
        RsvpOutcome::Waitlisted { entry, position } => {
            format!("{} is full. {} is #{} on the waitlist", event.title, entry.name, position)
        }
        RsvpOutcome::Rejected => format!("{} is full and has no waitlist.", event.title),
    };

    if !services.is_persistent() {
        return Ok(format!("{}\n(demo mode: configure a database to persist RSVPs)", reply));
    }
    Ok(reply)
}

/// Handle `checkin <event> <attendee>`
pub async fn handle_check_in(services: &ServiceFactory, event_ref: &str, attendee_ref: &str) -> Result<String> {
    let event = resolve_event(services, event_ref).await?;
    let attendee = resolve_attendee(services, &event, attendee_ref).await?;
    let updated = services.admission.toggle_check_in(event.id, attendee.id).await?;

    if updated.checked_in {
        Ok(format!("{} checked in", updated.name))
    } else {
        Ok(format!("{} is no longer checked in", updated.name))
    }
}

/// Handle `remove <event> <attendee>`
pub async fn handle_remove(services: &ServiceFactory, event_ref: &str, attendee_ref: &str) -> Result<String> {
    let event = resolve_event(services, event_ref).await?;
    let attendee = resolve_attendee(services, &event, attendee_ref).await?;
    let removed = services.admission.remove_attendee(event.id, attendee.id).await?;

    Ok(format!("Removed {} from {}", removed.name, event.title))
}

/// Handle `promote <event>`
pub async fn handle_promote(services: &ServiceFactory, reference: &str) -> Result<String> {
    let event = resolve_event(services, reference).await?;

    match services.admission.promote_from_waitlist(event.id).await? {
        Some(attendee) => Ok(format!("Promoted {} from the waitlist", attendee.name)),
        None => Ok("Nobody was promoted: the waitlist is empty or the event is full.".to_string()),
    }
}
