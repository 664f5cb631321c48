//! # bookhub-auth
//!
//! JWT validation and identity claims for the BookHub scheduling service.
//!
//! Tokens are issued by the corporate identity provider; this crate only
//! validates them and exposes the claims the service cares about (the
//! user's directory SID, display name, email, and group memberships).
//! The encoder exists for tooling and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
