//! # bookhub-scheduling
//!
//! The pure slot-scheduling core: computes valid slot boundaries from an
//! event's time window, snaps user-submitted instants to the nearest
//! boundary, and converts between the organizational time zone and UTC.
//!
//! Nothing in this crate performs I/O or touches transaction state; all
//! functions raise typed [`ScheduleError`]s and leave rollback decisions
//! to the coordinator.
//!
//! [`ScheduleError`]: bookhub_entity::ScheduleError

pub mod geometry;
pub mod normalizer;
pub mod timezone;

pub use normalizer::normalize_slot;
pub use timezone::{TimeZoneNormalizer, WallTime};
