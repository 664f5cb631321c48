//! Event entity model and construction invariants.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookhub_core::types::EventId;

use crate::error::ScheduleError;

/// Maximum length of the title and location fields.
const MAX_TEXT_LENGTH: usize = 100;

/// A bookable time window split into fixed-duration sessions.
///
/// `available_slots` is derived from the window and session duration at
/// creation time. It deliberately does not subtract slots occupied by the
/// break window; break exclusion happens at the per-slot validity check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Where the event takes place.
    pub location: String,
    /// Length of one session slot in minutes.
    pub duration_minutes: i32,
    /// When the bookable window opens (UTC).
    pub starts_at: DateTime<Utc>,
    /// When the bookable window closes (UTC, exclusive).
    pub ends_at: DateTime<Utc>,
    /// Number of session slots fitting in the window.
    pub available_slots: i32,
    /// Optional break window start (UTC).
    pub break_start: Option<DateTime<Utc>>,
    /// Optional break window end (UTC).
    pub break_end: Option<DateTime<Utc>>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether a break window is configured.
    pub fn has_break_window(&self) -> bool {
        self.break_start.is_some() && self.break_end.is_some()
    }

    /// Attach a break window to the event.
    ///
    /// Fails when a break window already exists (it must be removed first)
    /// or when the bounds are not strictly ordered. Containment within the
    /// event's own window is left to the caller.
    pub fn add_break_window(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), ScheduleError> {
        if self.has_break_window() {
            return Err(ScheduleError::InvalidEvent(
                "a break window already exists; remove it first".to_string(),
            ));
        }
        if start >= end {
            return Err(ScheduleError::InvalidTiming(
                "break window start must be before its end".to_string(),
            ));
        }
        self.break_start = Some(start);
        self.break_end = Some(end);
        Ok(())
    }

    /// Remove the break window, if any.
    pub fn remove_break_window(&mut self) {
        self.break_start = None;
        self.break_end = None;
    }

    /// The wall-clock time-of-day at which the event window opens, used as
    /// the reference for slot normalization.
    pub fn start_time_of_day(&self) -> NaiveTime {
        self.starts_at.time()
    }

    /// The UTC calendar day of the event's start, used by the same-day
    /// booking rule.
    pub fn start_date(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }
}

/// Data required to create a new event.
///
/// Validation runs before any row is written; a failure reports the first
/// violated rule, checked in a fixed order: title, duration, location,
/// time ordering, slot count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Session duration in minutes.
    pub duration_minutes: i32,
    /// Location string.
    pub location: String,
    /// Window open instant (UTC).
    pub starts_at: DateTime<Utc>,
    /// Window close instant (UTC).
    pub ends_at: DateTime<Utc>,
    /// Derived slot count.
    pub available_slots: i32,
}

impl CreateEvent {
    /// Check all construction invariants, reporting the first violation.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        validate_fields(
            &self.title,
            self.duration_minutes,
            &self.location,
            self.starts_at,
            self.ends_at,
            self.available_slots,
        )
    }
}

/// Full-field event update; re-validates the same invariants as creation,
/// plus break window ordering when one is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Event title.
    pub title: String,
    /// Session duration in minutes.
    pub duration_minutes: i32,
    /// Location string.
    pub location: String,
    /// Window open instant (UTC).
    pub starts_at: DateTime<Utc>,
    /// Window close instant (UTC).
    pub ends_at: DateTime<Utc>,
    /// Derived slot count.
    pub available_slots: i32,
    /// Break window start, if any.
    pub break_start: Option<DateTime<Utc>>,
    /// Break window end, if any.
    pub break_end: Option<DateTime<Utc>>,
}

impl UpdateEvent {
    /// Check all update invariants, reporting the first violation.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        validate_fields(
            &self.title,
            self.duration_minutes,
            &self.location,
            self.starts_at,
            self.ends_at,
            self.available_slots,
        )?;

        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) if start < end => Ok(()),
            (Some(_), Some(_)) => Err(ScheduleError::InvalidTiming(
                "break window start must be before its end".to_string(),
            )),
            _ => Err(ScheduleError::InvalidEvent(
                "break window requires both start and end".to_string(),
            )),
        }
    }
}

fn validate_fields(
    title: &str,
    duration_minutes: i32,
    location: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    available_slots: i32,
) -> Result<(), ScheduleError> {
    if title.trim().is_empty() {
        return Err(ScheduleError::InvalidEvent(
            "title must not be empty".to_string(),
        ));
    }
    if title.len() > MAX_TEXT_LENGTH {
        return Err(ScheduleError::InvalidEvent(format!(
            "title must not exceed {MAX_TEXT_LENGTH} characters"
        )));
    }
    if duration_minutes <= 0 {
        return Err(ScheduleError::InvalidTiming(
            "session duration must be greater than zero".to_string(),
        ));
    }
    if location.trim().is_empty() {
        return Err(ScheduleError::InvalidEvent(
            "location must not be empty".to_string(),
        ));
    }
    if location.len() > MAX_TEXT_LENGTH {
        return Err(ScheduleError::InvalidEvent(format!(
            "location must not exceed {MAX_TEXT_LENGTH} characters"
        )));
    }
    if starts_at >= ends_at {
        return Err(ScheduleError::InvalidTiming(
            "event start must be before event end".to_string(),
        ));
    }
    if available_slots < 0 {
        return Err(ScheduleError::InvalidEvent(
            "available slot count must not be negative".to_string(),
        ));
    }
    Ok(())
}
