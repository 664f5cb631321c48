//! Reservation repository implementation.
//!
//! The transactional methods here are the store half of the booking
//! protocol's correctness story: the coordinator takes a per-user advisory
//! lock for the duplicate/same-day checks, and the partial unique indexes
//! on `(event_id, slot_at)` and `(event_id, user_sid)` backstop the slot
//! race; a unique violation at insert is translated into the matching
//! conflict error rather than surfacing as a raw database failure.

use chrono::NaiveDate;
use sqlx::postgres::PgDatabaseError;
use sqlx::{PgPool, Postgres, Transaction};

use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;
use bookhub_core::types::{EventId, ReservationId};
use bookhub_entity::error::ScheduleError;
use bookhub_entity::reservation::{CreateReservation, Reservation};

/// Unique index guarding slot exclusivity per event.
const UNIQUE_EVENT_SLOT: &str = "uq_reservations_event_slot";
/// Unique index guarding one reservation per user per event.
const UNIQUE_EVENT_USER: &str = "uq_reservations_event_user";

/// Repository for reservation CRUD and conflict queries.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Take a transaction-scoped advisory lock on the user, serializing
    /// the duplicate-booking and same-day checks for that user. Released
    /// automatically at commit or rollback.
    pub async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_sid: &str,
    ) -> AppResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(user_sid)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to acquire user lock", e)
            })?;
        Ok(())
    }

    /// Whether any active reservation occupies the given (event, slot) pair.
    pub async fn slot_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
        slot_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reservations \
             WHERE event_id = $1 AND slot_at = $2 AND status = 'active')",
        )
        .bind(event_id)
        .bind(slot_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check slot use", e))
    }

    /// Whether the user already holds an active reservation for the event.
    pub async fn user_has_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
        user_sid: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reservations \
             WHERE event_id = $1 AND user_sid = $2 AND status = 'active')",
        )
        .bind(event_id)
        .bind(user_sid)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check duplicate booking", e)
        })
    }

    /// Whether the user holds an active reservation for any event whose
    /// start falls on the given UTC calendar day.
    pub async fn user_has_booking_on_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_sid: &str,
        day: NaiveDate,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reservations r \
             JOIN events e ON e.id = r.event_id \
             WHERE r.user_sid = $1 AND r.status = 'active' \
             AND (e.starts_at AT TIME ZONE 'UTC')::date = $2)",
        )
        .bind(user_sid)
        .bind(day)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check same-day booking", e)
        })
    }

    /// Insert a new active reservation inside the booking transaction.
    ///
    /// A unique violation on one of the reservation indexes means another
    /// transaction won the race after our existence checks; it is mapped
    /// to the corresponding conflict error.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateReservation,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (event_id, user_sid, slot_at, status) \
             VALUES ($1, $2, $3, 'active') RETURNING *",
        )
        .bind(data.event_id)
        .bind(&data.user_sid)
        .bind(data.slot_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(UNIQUE_EVENT_SLOT) => ScheduleError::SlotConflict.into(),
            Some(UNIQUE_EVENT_USER) => ScheduleError::DuplicateBooking.into(),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create reservation", e),
        })
    }

    /// Find a reservation by its own identifier.
    pub async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// List all active reservations held by a user, soonest slot first.
    pub async fn find_by_user(&self, user_sid: &str) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_sid = $1 AND status = 'active' \
             ORDER BY slot_at ASC",
        )
        .bind(user_sid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reservations", e)
        })
    }

    /// Delete the user's active reservation for an event, returning the
    /// deleted row when one existed.
    pub async fn delete_by_event_and_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: EventId,
        user_sid: &str,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "DELETE FROM reservations WHERE event_id = $1 AND user_sid = $2 AND status = 'active' \
             RETURNING *",
        )
        .bind(event_id)
        .bind(user_sid)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete reservation", e)
        })
    }

    /// Delete a reservation by identifier, returning the deleted row when
    /// one existed. Used by administrative cancellation, which treats an
    /// absent row as idempotent success.
    pub async fn delete_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("DELETE FROM reservations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reservation", e)
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
