//! Event repository implementation.

use sqlx::{PgPool, Postgres, Transaction};

use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;
use bookhub_core::types::EventId;
use bookhub_entity::event::{CreateEvent, Event, UpdateEvent};

/// Repository for event CRUD and query operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Find an event by ID inside an open transaction, taking a row lock
    /// so that concurrent bookings against the same event serialize on the
    /// slot checks that follow.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: EventId,
    ) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock event", e))
    }

    /// List all events ordered by start instant.
    pub async fn list(&self) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY starts_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Create a new event.
    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (title, location, duration_minutes, starts_at, ends_at, available_slots) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.location)
        .bind(data.duration_minutes)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.available_slots)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// Replace all mutable fields of an event.
    pub async fn update(&self, id: EventId, data: &UpdateEvent) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = $2, location = $3, duration_minutes = $4, starts_at = $5, \
             ends_at = $6, available_slots = $7, break_start = $8, break_end = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.location)
        .bind(data.duration_minutes)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.available_slots)
        .bind(data.break_start)
        .bind(data.break_end)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))
    }

    /// Delete an event. Reservations and interest entries cascade through
    /// their foreign keys.
    pub async fn delete(&self, id: EventId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
