//! Snapping arbitrary user-submitted instants to the nearest valid slot
//! boundary.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Snap `requested` to the nearest slot boundary of the grid anchored at
/// `reference_time_of_day` on the requested instant's own day.
///
/// The rounding mode is round-half-away-from-zero: an instant exactly
/// halfway between two boundaries resolves to the later one when it lies
/// after the reference, and to the earlier one when before. Consistency
/// here is what makes equidistant inputs deterministic.
///
/// No clamping to any event window happens here; an instant far outside
/// the event's day still normalizes arithmetically, and the caller is
/// responsible for range checks.
pub fn normalize_slot(
    requested: DateTime<Utc>,
    duration_minutes: i32,
    reference_time_of_day: NaiveTime,
) -> DateTime<Utc> {
    debug_assert!(duration_minutes > 0);

    let reference = requested
        .date_naive()
        .and_time(reference_time_of_day)
        .and_utc();

    let diff_minutes = (requested - reference).num_minutes();
    let slots = round_half_away_from_zero(diff_minutes, i64::from(duration_minutes));

    reference + Duration::minutes(slots * i64::from(duration_minutes))
}

/// Integer division of `numerator / denominator` rounded to the nearest
/// whole number, halves away from zero. `denominator` must be positive.
fn round_half_away_from_zero(numerator: i64, denominator: i64) -> i64 {
    if numerator >= 0 {
        (2 * numerator + denominator) / (2 * denominator)
    } else {
        -((2 * -numerator + denominator) / (2 * denominator))
    }
}
