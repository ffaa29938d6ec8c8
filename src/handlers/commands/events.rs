//! Event command handlers

use std::collections::HashMap;

use tracing::debug;

use crate::handlers::render::{event_line, render_details, short_id};
use crate::services::{EventForm, ServiceFactory};
use crate::utils::errors::Result;

use super::resolve_event;

/// Handle `events [query]` - list events matching the search
pub async fn handle_events_list(services: &ServiceFactory, query: &str) -> Result<String> {
    let events = services.events.search(query).await?;
    debug!(query = %query, matches = events.len(), "Listing events");

    if events.is_empty() {
        return Ok("No events match your search.".to_string());
    }

    let tz = services.events.timezone();
    let mut lines = Vec::with_capacity(events.len());
    for event in &events {
        let stats = services.admission.stats(event.id).await?;
        lines.push(event_line(event, &stats, tz));
    }
    Ok(lines.join("\n"))
}

/// Handle `show <event>` - full event details
pub async fn handle_show(services: &ServiceFactory, reference: &str) -> Result<String> {
    let event = resolve_event(services, reference).await?;
    let attendees = services.admission.attendees(event.id).await?;
    let waitlist = services.admission.waitlist(event.id).await?;
    let stats = services.admission.stats(event.id).await?;
    let map_url = event.map_embed_url()?;

    Ok(render_details(
        &event,
        map_url.as_str(),
        &attendees,
        &waitlist,
        &stats,
        services.events.timezone(),
    ))
}

/// Handle `create key=value ...` - create a new event
pub async fn handle_create_event(services: &ServiceFactory, fields: &HashMap<String, String>) -> Result<String> {
    let form = EventForm::from_pairs(fields)?;
    let event = services.events.create_event(form).await?;

    Ok(format!(
        "Created event [{}] {} ({} spots)",
        short_id(event.id),
        event.title,
        event.capacity
    ))
}

/// Handle `export <event>` - write the attendee CSV
pub async fn handle_export(services: &ServiceFactory, reference: &str) -> Result<String> {
    let event = resolve_event(services, reference).await?;

    match services.export.export_to_dir(event.id, &services.export_dir).await? {
        Some(path) => Ok(format!("Exported attendees to {}", path.display())),
        None => Ok(format!("{} has no attendees to export.", event.title)),
    }
}
