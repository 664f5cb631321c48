//! End-to-end tests against a real PostgreSQL database.

mod helpers;

mod event_test;
mod scheduling_test;
