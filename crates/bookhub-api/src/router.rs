//! Route definitions for the BookHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(event_routes())
        .merge(schedule_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Event catalog endpoints.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/event", post(handlers::event::create_event))
        .route("/event", get(handlers::event::list_events))
        .route("/event/{id}", put(handlers::event::update_event))
        .route("/event/{id}", delete(handlers::event::delete_event))
        .route(
            "/event/{id}/interest",
            post(handlers::event::register_interest),
        )
}

/// Booking and cancellation endpoints.
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule-event", post(handlers::schedule::book_slot))
        // GET takes a user SID, DELETE an event id; one capture serves both.
        .route(
            "/schedule-event/{id}",
            get(handlers::schedule::list_reservations)
                .delete(handlers::schedule::cancel_booking),
        )
        .route(
            "/schedule-event/admin-cancel/{id}",
            delete(handlers::schedule::admin_cancel),
        )
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
