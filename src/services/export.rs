//! Attendee CSV export

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::Event;
use crate::store::SharedEventStore;
use crate::utils::errors::{PlayMateError, Result};
use crate::utils::helpers::{format_date, format_time, sanitize_filename};

/// One line of the attendee sheet handed to organizers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendeeRow {
    pub event_id: Uuid,
    pub event_title: String,
    pub date: String,
    pub time: String,
    pub name: String,
    pub checked_in: &'static str,
}

#[derive(Clone)]
pub struct ExportService {
    store: SharedEventStore,
    timezone: Tz,
}

impl ExportService {
    pub fn new(store: SharedEventStore, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    async fn require_event(&self, event_id: Uuid) -> Result<Event> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or(PlayMateError::EventNotFound { event_id })
    }

    /// Rows for every attendee of an event, in RSVP order
    pub async fn attendee_rows(&self, event_id: Uuid) -> Result<Vec<AttendeeRow>> {
        let event = self.require_event(event_id).await?;
        let date = format_date(event.start, self.timezone);
        let time = format!(
            "{}-{}",
            format_time(event.start, self.timezone),
            format_time(event.finish, self.timezone)
        );

        let attendees = self.store.list_attendees(event_id).await?;
        Ok(attendees
            .into_iter()
            .map(|a| AttendeeRow {
                event_id: event.id,
                event_title: event.title.clone(),
                date: date.clone(),
                time: time.clone(),
                name: a.name,
                checked_in: if a.checked_in { "yes" } else { "no" },
            })
            .collect())
    }

    /// CSV text for an event's attendees, `None` when nobody has RSVPed
    pub async fn render_csv(&self, event_id: Uuid) -> Result<Option<String>> {
        let rows = self.attendee_rows(event_id).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PlayMateError::Io(e.into_error()))?;

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| PlayMateError::InvalidInput(format!("Export is not valid UTF-8: {}", e)))
    }

    /// Write the attendee sheet into `dir`; returns the file path when written
    pub async fn export_to_dir(&self, event_id: Uuid, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let event = self.require_event(event_id).await?;
        let Some(csv) = self.render_csv(event_id).await? else {
            return Ok(None);
        };

        let path = dir.as_ref().join(export_filename(&event));
        tokio::fs::write(&path, csv).await?;
        info!(event_id = %event_id, path = %path.display(), "Attendee list exported");
        Ok(Some(path))
    }
}

/// `<title>_attendees.csv` with spaces turned into underscores
pub fn export_filename(event: &Event) -> String {
    sanitize_filename(&format!("{}_attendees.csv", event.title.replace(' ', "_")))
}
