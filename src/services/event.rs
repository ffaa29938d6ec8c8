//! Event service implementation
//!
//! This service handles event creation from the organizer form, listing,
//! search and the demo event seeded into empty stores.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{EventDefaults, Settings};
use crate::models::{CreateEventRequest, Event, SkillLevel};
use crate::store::SharedEventStore;
use crate::utils::errors::{PlayMateError, Result};
use crate::utils::logging::log_event_created;

const DEFAULT_START_HOUR: u32 = 18;
const DEFAULT_END_HOUR: u32 = 20;

/// Organizer form input. Blank fields fall back to configured defaults.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: Option<String>,
    pub level: Option<SkillLevel>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
    pub courts: Option<i32>,
    pub price: Option<f64>,
    pub contact: Option<String>,
    pub pay_in_person: Option<bool>,
    pub waitlist_enabled: Option<bool>,
    pub notes: Option<String>,
}

impl EventForm {
    /// Build a form from `key=value` pairs
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Result<Self> {
        let mut form = EventForm::default();

        for (key, value) in pairs {
            let value = value.trim();
            match key.as_str() {
                "title" => form.title = Some(value.to_string()),
                "level" => {
                    form.level = Some(value.parse().map_err(|e: crate::models::UnknownSkillLevel| {
                        PlayMateError::InvalidInput(e.to_string())
                    })?)
                }
                "date" => form.date = Some(parse_field(key, value, |v| NaiveDate::parse_from_str(v, "%Y-%m-%d"))?),
                "start" => form.start_time = Some(parse_field(key, value, |v| NaiveTime::parse_from_str(v, "%H:%M"))?),
                "end" => form.end_time = Some(parse_field(key, value, |v| NaiveTime::parse_from_str(v, "%H:%M"))?),
                "location" => form.location = Some(value.to_string()),
                "lat" => form.latitude = Some(parse_field(key, value, str::parse::<f64>)?),
                "lon" => form.longitude = Some(parse_field(key, value, str::parse::<f64>)?),
                "capacity" => form.capacity = Some(parse_field(key, value, str::parse::<i32>)?),
                "courts" => form.courts = Some(parse_field(key, value, str::parse::<i32>)?),
                "price" => form.price = Some(parse_field(key, value, str::parse::<f64>)?),
                "contact" => form.contact = Some(value.to_string()),
                "pay_in_person" => form.pay_in_person = Some(parse_flag(key, value)?),
                "waitlist" => form.waitlist_enabled = Some(parse_flag(key, value)?),
                "notes" => form.notes = Some(value.to_string()),
                other => {
                    return Err(PlayMateError::InvalidInput(format!("Unknown field: {}", other)));
                }
            }
        }

        Ok(form)
    }

    /// Resolve defaults and local times into a store request
    pub fn into_request(self, defaults: &EventDefaults, tz: Tz) -> Result<CreateEventRequest> {
        let date = self
            .date
            .unwrap_or_else(|| tz.from_utc_datetime(&Utc::now().naive_utc()).date_naive());
        let start_time = match self.start_time {
            Some(time) => time,
            None => on_the_hour(DEFAULT_START_HOUR)?,
        };
        let end_time = match self.end_time {
            Some(time) => time,
            None => on_the_hour(DEFAULT_END_HOUR)?,
        };

        let request = CreateEventRequest {
            title: non_blank(self.title).unwrap_or_else(|| defaults.title.clone()),
            level: self.level.unwrap_or_default(),
            location: non_blank(self.location).unwrap_or_else(|| defaults.location.clone()),
            latitude: self.latitude.unwrap_or(defaults.latitude),
            longitude: self.longitude.unwrap_or(defaults.longitude),
            start: local_to_utc(tz, date.and_time(start_time))?,
            finish: local_to_utc(tz, date.and_time(end_time))?,
            capacity: self.capacity.unwrap_or(defaults.capacity),
            courts: self.courts.unwrap_or(defaults.courts),
            price: self.price.unwrap_or(defaults.price),
            contact: non_blank(self.contact).unwrap_or_else(|| defaults.contact.clone()),
            pay_in_person: self.pay_in_person.unwrap_or(true),
            waitlist_enabled: self.waitlist_enabled.unwrap_or(true),
            notes: self.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
        };

        request.validate()?;
        Ok(request)
    }
}

fn parse_field<T, E, F>(key: &str, value: &str, parse: F) -> Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: std::fmt::Display,
{
    parse(value).map_err(|e| PlayMateError::InvalidInput(format!("Invalid {}: {} ({})", key, value, e)))
}

fn on_the_hour(hour: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or_else(|| PlayMateError::InvalidInput(format!("Invalid hour: {}", hour)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(PlayMateError::InvalidInput(format!("Invalid {}: {}", key, value))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Result<chrono::DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| PlayMateError::InvalidInput(format!("{} does not exist in {}", local, tz)))
}

/// Event service for creating and browsing events
#[derive(Clone)]
pub struct EventService {
    store: SharedEventStore,
    defaults: EventDefaults,
    timezone: Tz,
}

impl EventService {
    pub fn new(store: SharedEventStore, settings: &Settings) -> Self {
        Self {
            store,
            defaults: settings.defaults.clone(),
            timezone: settings.timezone(),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Create an event from the organizer form
    pub async fn create_event(&self, form: EventForm) -> Result<Event> {
        let request = form.into_request(&self.defaults, self.timezone)?;
        let event = self.store.insert_event(request).await?;
        log_event_created(event.id, &event.title, event.capacity);
        Ok(event)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or(PlayMateError::EventNotFound { event_id })
    }

    /// All events, latest start first
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events = self.store.list_events().await?;
        events.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(events)
    }

    /// Case-insensitive match on title, location or level
    pub async fn search(&self, query: &str) -> Result<Vec<Event>> {
        let events = self.list_events().await?;
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(events);
        }

        debug!(query = %query, "Searching events");
        Ok(events
            .into_iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&query)
                    || e.location.to_lowercase().contains(&query)
                    || e.level.label().to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Insert the demo event if the store has no events yet
    pub async fn seed_demo_event(&self) -> Result<Option<Event>> {
        if !self.store.list_events().await?.is_empty() {
            return Ok(None);
        }

        let event = self.store.insert_event(demo_event()?).await?;
        info!(event_id = %event.id, "Seeded demo event");
        Ok(Some(event))
    }
}

/// The sample drop-in shown in demo mode
pub fn demo_event() -> Result<CreateEventRequest> {
    let parse = |s: &str| {
        chrono::DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| PlayMateError::InvalidInput(e.to_string()))
    };

    Ok(CreateEventRequest {
        title: "Drop-in Volleyball".to_string(),
        level: SkillLevel::AllLevels,
        location: "717 Rue Saint-Ferdinand, Montréal".to_string(),
        latitude: 45.4793,
        longitude: -73.5699,
        start: parse("2025-10-05T18:00:00-04:00")?,
        finish: parse("2025-10-05T20:00:00-04:00")?,
        capacity: 24,
        courts: 3,
        price: 12.0,
        contact: "514-241-0316".to_string(),
        pay_in_person: true,
        waitlist_enabled: true,
        notes: "Bring clean indoor shoes.".to_string(),
    })
}
