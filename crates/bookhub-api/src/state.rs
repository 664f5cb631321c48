//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use bookhub_auth::jwt::decoder::JwtDecoder;
use bookhub_core::config::AppConfig;
use bookhub_service::event::EventService;
use bookhub_service::scheduling::SchedulingCoordinator;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Event catalog service.
    pub event_service: Arc<EventService>,
    /// Booking coordinator.
    pub coordinator: Arc<SchedulingCoordinator>,
}
