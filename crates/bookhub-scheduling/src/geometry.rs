//! Slot geometry: how many sessions fit into an event window and where
//! their boundaries lie.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use bookhub_entity::error::ScheduleError;
use bookhub_entity::event::Event;

/// Number of non-overlapping `duration_minutes`-sized sessions fitting in
/// `[start, end)`. A fractional final slot is dropped.
pub fn slot_count(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i32,
) -> Result<i32, ScheduleError> {
    if start >= end {
        return Err(ScheduleError::InvalidTiming(
            "event start must be before event end".to_string(),
        ));
    }
    if duration_minutes <= 0 {
        return Err(ScheduleError::InvalidTiming(
            "session duration must be greater than zero".to_string(),
        ));
    }
    let window_minutes = (end - start).num_minutes();
    Ok((window_minutes / i64::from(duration_minutes)) as i32)
}

/// The ordered sequence of valid slot boundaries for an event:
/// `start, start+duration, ...` for exactly `available_slots` entries.
///
/// The sequence does not subtract break-window slots; `available_slots`
/// can therefore overstate bookable capacity. Break exclusion happens in
/// [`is_valid_slot`] only. Known inconsistency, kept pending product
/// clarification.
pub fn valid_slots(event: &Event) -> Vec<DateTime<Utc>> {
    let count = event.available_slots.max(0);
    (0..count)
        .map(|k| event.starts_at + Duration::minutes(i64::from(k * event.duration_minutes)))
        .collect()
}

/// Whether the given instant exactly matches a valid, non-break slot of
/// the event. Matching is at minute granularity: year, month, day, hour,
/// and minute must all agree.
pub fn is_valid_slot(event: &Event, instant: DateTime<Utc>) -> bool {
    valid_slots(event)
        .into_iter()
        .any(|slot| minute_eq(slot, instant) && !overlaps_break(event, slot))
}

/// Minute-granularity equality of two instants.
pub fn minute_eq(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year()
        && a.month() == b.month()
        && a.day() == b.day()
        && a.hour() == b.hour()
        && a.minute() == b.minute()
}

/// Whether the session starting at `slot` intersects the event's break
/// window `[break_start, break_end)`.
pub fn overlaps_break(event: &Event, slot: DateTime<Utc>) -> bool {
    match (event.break_start, event.break_end) {
        (Some(break_start), Some(break_end)) => {
            let slot_end = slot + Duration::minutes(i64::from(event.duration_minutes));
            slot < break_end && slot_end > break_start
        }
        _ => false,
    }
}
