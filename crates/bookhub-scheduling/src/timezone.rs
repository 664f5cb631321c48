//! Conversion between the fixed organizational time zone and UTC.
//!
//! All persisted timestamps are UTC; one named zone per deployment defines
//! the wall clock users see. The zone is configuration, not per-request.

use chrono::offset::LocalResult;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use bookhub_core::config::SchedulingConfig;
use bookhub_core::error::AppError;

/// A timestamp as submitted by a caller, distinguishing how its zone
/// information should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallTime {
    /// Already UTC; passed through unchanged.
    Utc(DateTime<Utc>),
    /// A bare wall-clock value, interpreted in the organizational zone.
    Local(NaiveDateTime),
    /// Tagged with some explicit offset.
    Offset(DateTime<FixedOffset>),
}

/// Converts between the deployment's organizational time zone and UTC.
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneNormalizer {
    /// The fixed organizational zone.
    tz: Tz,
}

impl TimeZoneNormalizer {
    /// Create a normalizer for the given zone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Create a normalizer from deployment configuration.
    pub fn from_config(config: &SchedulingConfig) -> Result<Self, AppError> {
        let tz = config.timezone.parse::<Tz>().map_err(|_| {
            AppError::configuration(format!(
                "scheduling.timezone '{}' is not a known IANA time zone",
                config.timezone
            ))
        })?;
        Ok(Self::new(tz))
    }

    /// The zone this normalizer operates against.
    pub fn zone(&self) -> Tz {
        self.tz
    }

    /// Convert a caller-supplied timestamp to UTC.
    ///
    /// A zero-offset tag (`Z` or `+00:00`) counts as already UTC and is
    /// never reinterpreted through the organizational zone; only non-zero
    /// foreign offsets are read as that zone's wall clock.
    ///
    /// Local wall-clock values falling in a spring-forward gap are returned
    /// reinterpreted as UTC unchanged instead of erroring, so an odd client
    /// timestamp cannot crash the booking path. This is coarse by intent;
    /// the geometry check downstream rejects anything that does not land on
    /// a real slot boundary.
    pub fn to_utc(&self, input: WallTime) -> DateTime<Utc> {
        match input {
            WallTime::Utc(dt) => dt,
            WallTime::Local(naive) => match self.tz.from_local_datetime(&naive) {
                LocalResult::Single(dt) => dt.with_timezone(&Utc),
                // Fall-back ambiguity: take the earlier offset.
                LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
                LocalResult::None => {
                    warn!(
                        wall_clock = %naive,
                        zone = %self.tz,
                        "Wall-clock instant falls in a DST gap; passing through as UTC"
                    );
                    Utc.from_utc_datetime(&naive)
                }
            },
            WallTime::Offset(dt) => {
                if dt.offset().local_minus_utc() == 0 {
                    // A Z or +00:00 tag marks the instant as already UTC;
                    // it passes through untouched.
                    return dt.with_timezone(&Utc);
                }
                let zone_offset = self.tz.offset_from_utc_datetime(&dt.naive_utc()).fix();
                if *dt.offset() == zone_offset {
                    // Offset already equivalent to the organizational zone
                    // at that instant; a plain conversion cannot
                    // double-shift.
                    dt.with_timezone(&Utc)
                } else {
                    self.to_utc(WallTime::Local(dt.naive_local()))
                }
            }
        }
    }

    /// Convert a UTC instant to the organizational zone's wall clock.
    pub fn from_utc(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }
}
