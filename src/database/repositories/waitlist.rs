//! Waitlist repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use crate::models::attendee::{Attendee, WaitlistEntry};
use crate::utils::errors::PlayMateError;

#[derive(Debug, Clone)]
pub struct WaitlistRepository {
    pool: PgPool,
}

impl WaitlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a player to the end of an event's waitlist
    pub async fn push(&self, event_id: Uuid, name: &str) -> Result<WaitlistEntry, PlayMateError> {
        let entry = sqlx::query_as::<_, WaitlistEntry>(
            r#"
            INSERT INTO waitlist (id, event_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, name, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Delete waitlist entry
    pub async fn delete(&self, id: Uuid) -> Result<bool, PlayMateError> {
        let result = sqlx::query("DELETE FROM waitlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Move an entry into the attendees table in one transaction.
    /// Returns `None` when the entry was already gone.
    pub async fn promote(&self, entry: &WaitlistEntry) -> Result<Option<Attendee>, PlayMateError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM waitlist WHERE id = $1")
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;
        if removed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let attendee = sqlx::query_as::<_, Attendee>(
            r#"
            INSERT INTO attendees (id, event_id, name, checked_in, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING id, event_id, name, checked_in, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(entry.event_id)
        .bind(&entry.name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(attendee))
    }

    /// Get an event's waitlist, head first
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<WaitlistEntry>, PlayMateError> {
        let entries = sqlx::query_as::<_, WaitlistEntry>(
            "SELECT id, event_id, name, created_at FROM waitlist WHERE event_id = $1 ORDER BY position ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
