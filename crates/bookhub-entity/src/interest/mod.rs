//! Waitlist interest entities.

pub mod model;

pub use model::{InterestEntry, InterestPolicy};
