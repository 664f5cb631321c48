//! # bookhub-entity
//!
//! Domain entity models for BookHub. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! Aggregate-level invariants live next to the entities they protect; the
//! typed [`ScheduleError`] taxonomy is how violations surface to callers.

pub mod error;
pub mod event;
pub mod interest;
pub mod reservation;

pub use error::ScheduleError;
