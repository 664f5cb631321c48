//! Concrete repository implementations.

pub mod event;
pub mod interest;
pub mod reservation;

pub use event::EventRepository;
pub use interest::InterestRepository;
pub use reservation::ReservationRepository;
