//! # bookhub-service
//!
//! Business logic service layer for BookHub. Services orchestrate
//! repositories, the scheduling core, the directory, and notifications to
//! implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod event;
pub mod scheduling;
mod tx;

pub use context::RequestContext;
pub use event::{CreateEventRequest, EventService, UpdateEventRequest};
pub use scheduling::SchedulingCoordinator;
