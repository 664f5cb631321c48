//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookhub_core::types::{EventId, ReservationId};

/// One user's claim on one slot of one event.
///
/// Cancellation hard-deletes the row, so the state space observed by
/// readers is exists-and-active vs absent; there is no resurrection path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: ReservationId,
    /// The event this reservation belongs to.
    pub event_id: EventId,
    /// Stable directory security identifier of the holder.
    pub user_sid: String,
    /// The reserved slot boundary (UTC).
    pub slot_at: DateTime<Utc>,
    /// Reservation status.
    pub status: ReservationStatus,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
}

/// Reservation lifecycle status.
///
/// `Active → Cancelled` is one-way; in practice cancelled rows are deleted
/// rather than flagged, so persisted rows are always `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The reservation holds its slot.
    Active,
    /// Terminal state; never persisted, rows are deleted instead.
    Cancelled,
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// The event being booked.
    pub event_id: EventId,
    /// Directory security identifier of the booking user.
    pub user_sid: String,
    /// The normalized slot boundary (UTC).
    pub slot_at: DateTime<Utc>,
}
