//! Attendee repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use crate::models::attendee::Attendee;
use crate::utils::errors::PlayMateError;

#[derive(Debug, Clone)]
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add an attendee to an event
    pub async fn create(&self, event_id: Uuid, name: &str) -> Result<Attendee, PlayMateError> {
        let attendee = sqlx::query_as::<_, Attendee>(
            r#"
            INSERT INTO attendees (id, event_id, name, checked_in, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING id, event_id, name, checked_in, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(attendee)
    }

    /// Set the check-in flag
    pub async fn set_checked_in(&self, id: Uuid, checked_in: bool) -> Result<Option<Attendee>, PlayMateError> {
        let attendee = sqlx::query_as::<_, Attendee>(
            r#"
            UPDATE attendees
            SET checked_in = $2
            WHERE id = $1
            RETURNING id, event_id, name, checked_in, created_at
            "#
        )
        .bind(id)
        .bind(checked_in)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    /// Delete attendee
    pub async fn delete(&self, id: Uuid) -> Result<bool, PlayMateError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get attendees of an event in RSVP order
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Attendee>, PlayMateError> {
        let attendees = sqlx::query_as::<_, Attendee>(
            "SELECT id, event_id, name, checked_in, created_at FROM attendees WHERE event_id = $1 ORDER BY created_at ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }
}
