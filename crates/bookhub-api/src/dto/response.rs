//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookhub_core::types::{EventId, InterestEntryId, ReservationId};
use bookhub_entity::event::Event;
use bookhub_entity::interest::InterestEntry;
use bookhub_entity::reservation::{Reservation, ReservationStatus};

/// Event summary returned by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    /// Event ID.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Location.
    pub location: String,
    /// Session duration in minutes.
    pub duration_minutes: i32,
    /// Window open instant (UTC).
    pub starts_at: DateTime<Utc>,
    /// Window close instant (UTC).
    pub ends_at: DateTime<Utc>,
    /// Number of session slots in the window.
    pub available_slots: i32,
    /// Break window start, if configured.
    pub break_start: Option<DateTime<Utc>>,
    /// Break window end, if configured.
    pub break_end: Option<DateTime<Utc>>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            location: event.location,
            duration_minutes: event.duration_minutes,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            available_slots: event.available_slots,
            break_start: event.break_start,
            break_end: event.break_end,
        }
    }
}

/// Reservation summary returned by the booking endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    /// Reservation ID.
    pub id: ReservationId,
    /// The booked event.
    pub event_id: EventId,
    /// Holder's directory SID.
    pub user_sid: String,
    /// Booked slot instant (UTC).
    pub slot_at: DateTime<Utc>,
    /// Reservation status.
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            event_id: r.event_id,
            user_sid: r.user_sid,
            slot_at: r.slot_at,
            status: r.status,
        }
    }
}

/// Interest registration acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestResponse {
    /// Interest entry ID.
    pub id: InterestEntryId,
    /// The event of interest.
    pub event_id: EventId,
}

impl From<InterestEntry> for InterestResponse {
    fn from(entry: InterestEntry) -> Self {
        Self {
            id: entry.id,
            event_id: entry.event_id,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
