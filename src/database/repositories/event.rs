//! Event repository implementation

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;
use crate::models::event::{CreateEventRequest, Event, SkillLevel};
use crate::utils::errors::PlayMateError;

const EVENT_COLUMNS: &str = "id, title, level, location, latitude, longitude, start_at, finish_at, capacity, courts, price, contact, pay_in_person, waitlist_enabled, notes, created_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn event_from_row(row: &PgRow) -> sqlx::Result<Event> {
        let level: String = row.try_get("level")?;
        let level = level
            .parse::<SkillLevel>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Event {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            level,
            location: row.try_get("location")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            start: row.try_get("start_at")?,
            finish: row.try_get("finish_at")?,
            capacity: row.try_get("capacity")?,
            courts: row.try_get("courts")?,
            price: row.try_get("price")?,
            contact: row.try_get("contact")?,
            pay_in_person: row.try_get("pay_in_person")?,
            waitlist_enabled: row.try_get("waitlist_enabled")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, PlayMateError> {
        let event = request.into_event();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO events ({EVENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(event.level.as_str())
        .bind(&event.location)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.start)
        .bind(event.finish)
        .bind(event.capacity)
        .bind(event.courts)
        .bind(event.price)
        .bind(&event.contact)
        .bind(event.pay_in_person)
        .bind(event.waitlist_enabled)
        .bind(&event.notes)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::event_from_row(&row)?)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, PlayMateError> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::event_from_row).transpose()?)
    }

    /// List all events, newest start first
    pub async fn list(&self) -> Result<Vec<Event>, PlayMateError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::event_from_row).collect::<sqlx::Result<Vec<_>>>()?)
    }
}
