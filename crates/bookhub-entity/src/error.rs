//! Typed domain errors for the scheduling core.
//!
//! Lower layers (geometry, normalizer, aggregates) only raise these typed
//! errors; they never touch transaction state. The coordinator is the one
//! layer that decides rollback-vs-swallow, and the API boundary converts
//! through [`AppError`] for HTTP mapping.

use thiserror::Error;

use bookhub_core::error::{AppError, ErrorKind};

/// The domain error taxonomy for event and reservation rules.
///
/// Ordering of checks in the booking protocol guarantees that a caller who
/// sees a conflict variant can trust the slot was otherwise valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Event window or duration violates `start < end` / `duration > 0`.
    #[error("invalid timing: {0}")]
    InvalidTiming(String),
    /// An event field failed construction/update validation.
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    /// No event exists with the requested identifier.
    #[error("event not found")]
    EventNotFound,
    /// The normalized slot lies outside the event's `[start, end)` window.
    #[error("requested slot is outside the event window")]
    SlotOutOfRange,
    /// The normalized slot does not match any valid slot boundary, or it
    /// overlaps the break window.
    #[error("requested slot is not a valid slot of this event")]
    InvalidSlot,
    /// Another active reservation already occupies this (event, slot) pair.
    #[error("slot is already in use")]
    SlotConflict,
    /// The user already holds an active reservation for this event.
    #[error("user already has a reservation for this event")]
    DuplicateBooking,
    /// The user already holds an active reservation for another event on
    /// the same calendar day.
    #[error("user already has a reservation on this day")]
    SameDayConflict,
    /// No active reservation matches the cancellation request.
    #[error("reservation not found")]
    ScheduleNotFound,
    /// The event's interest list is full.
    #[error("interest list is full")]
    CapacityExceeded,
    /// The user is already on the event's interest list.
    #[error("user is already on the interest list")]
    DuplicateInterest,
}

impl ScheduleError {
    /// Stable machine-readable code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTiming(_) => "INVALID_TIMING",
            Self::InvalidEvent(_) => "INVALID_EVENT",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::SlotOutOfRange => "SLOT_OUT_OF_RANGE",
            Self::InvalidSlot => "INVALID_SLOT",
            Self::SlotConflict => "SLOT_CONFLICT",
            Self::DuplicateBooking => "DUPLICATE_BOOKING",
            Self::SameDayConflict => "SAME_DAY_CONFLICT",
            Self::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::DuplicateInterest => "DUPLICATE_INTEREST",
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let kind = match err {
            ScheduleError::InvalidTiming(_)
            | ScheduleError::InvalidEvent(_)
            | ScheduleError::SlotOutOfRange
            | ScheduleError::InvalidSlot
            // Cancelling a reservation that does not exist is a rejected
            // request, not a missing resource.
            | ScheduleError::ScheduleNotFound => ErrorKind::Validation,
            ScheduleError::SlotConflict
            | ScheduleError::DuplicateBooking
            | ScheduleError::SameDayConflict
            | ScheduleError::CapacityExceeded
            | ScheduleError::DuplicateInterest => ErrorKind::Conflict,
            ScheduleError::EventNotFound => ErrorKind::NotFound,
        };
        let code = err.code();
        AppError::new(kind, err.to_string()).with_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_conflict_kind() {
        let app: AppError = ScheduleError::SlotConflict.into();
        assert_eq!(app.kind, ErrorKind::Conflict);
        assert_eq!(app.code, Some("SLOT_CONFLICT"));
    }

    #[test]
    fn test_validation_maps_to_validation_kind() {
        let app: AppError = ScheduleError::InvalidTiming("start >= end".into()).into();
        assert_eq!(app.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_not_found_maps_to_not_found_kind() {
        let app: AppError = ScheduleError::EventNotFound.into();
        assert_eq!(app.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_cancellation_target_is_a_validation_error() {
        let app: AppError = ScheduleError::ScheduleNotFound.into();
        assert_eq!(app.kind, ErrorKind::Validation);
        assert_eq!(app.code, Some("SCHEDULE_NOT_FOUND"));
    }
}
