//! # bookhub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all BookHub entities.
//!
//! Repository methods that participate in the booking protocol accept a
//! `&mut Transaction<'_, Postgres>` so that only the coordinator owns the
//! transaction boundary.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
