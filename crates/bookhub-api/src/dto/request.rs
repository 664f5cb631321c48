//! Request DTOs.
//!
//! Event creation and update requests are defined next to the service
//! that consumes them; this module holds the booking-specific ones.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use bookhub_core::types::EventId;

/// Request body for booking a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    /// The event to book into.
    pub event_id: EventId,
    /// The requested slot instant, with explicit offset. Snapped to the
    /// nearest slot boundary by the coordinator.
    pub slot_at: DateTime<FixedOffset>,
}
