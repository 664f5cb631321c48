//! Reservation domain entities.

pub mod model;

pub use model::{CreateReservation, Reservation, ReservationStatus};
