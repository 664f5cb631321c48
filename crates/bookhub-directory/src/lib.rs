//! # bookhub-directory
//!
//! Lookups against the organizational directory. The service only needs
//! to resolve a user's SID to a display name and email when the identity
//! did not come in through a token. Administrative cancellation notifies
//! the affected user, whose claims are not on the request.

pub mod service;

pub use service::{DirectoryService, DirectoryUser, StaticDirectory};
