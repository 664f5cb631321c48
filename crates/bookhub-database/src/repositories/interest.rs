//! Waitlist interest repository implementation.
//!
//! Admission is a count-then-insert decision, so all methods here run
//! inside the caller's transaction; a per-event advisory lock serializes
//! concurrent registrations so the capacity ceiling holds under races.

use sqlx::postgres::PgDatabaseError;
use sqlx::{Postgres, Transaction};

use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;
use bookhub_core::types::EventId;
use bookhub_entity::error::ScheduleError;
use bookhub_entity::interest::InterestEntry;

/// Unique index guarding one interest entry per user per event.
const UNIQUE_EVENT_USER: &str = "uq_interest_event_user";

/// Repository for waitlist interest entries.
#[derive(Debug, Clone, Default)]
pub struct InterestRepository;

impl InterestRepository {
    /// Create a new interest repository.
    pub fn new() -> Self {
        Self
    }

    /// Take a transaction-scoped advisory lock on the event, serializing
    /// admission checks for that event. Released automatically at commit
    /// or rollback.
    pub async fn lock_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
    ) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(event_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to acquire event lock", e)
            })?;
        Ok(())
    }

    /// List interest entries for an event, oldest first.
    pub async fn find_by_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
    ) -> AppResult<Vec<InterestEntry>> {
        sqlx::query_as::<_, InterestEntry>(
            "SELECT * FROM interest_entries WHERE event_id = $1 ORDER BY created_at ASC",
        )
        .bind(event_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list interest entries", e)
        })
    }

    /// Register a user's interest in an event.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
        user_sid: &str,
    ) -> AppResult<InterestEntry> {
        sqlx::query_as::<_, InterestEntry>(
            "INSERT INTO interest_entries (event_id, user_sid) VALUES ($1, $2) RETURNING *",
        )
        .bind(event_id)
        .bind(user_sid)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(UNIQUE_EVENT_USER) => ScheduleError::DuplicateInterest.into(),
            _ => AppError::with_source(ErrorKind::Database, "Failed to register interest", e),
        })
    }
}

/// Extract the constraint name when the error is a PostgreSQL unique
/// violation (SQLSTATE 23505).
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) => db
            .try_downcast_ref::<PgDatabaseError>()
            .filter(|pg| pg.code() == "23505")
            .and_then(|pg| pg.constraint()),
        _ => None,
    }
}
