//! Event catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bookhub_core::error::AppError;
use bookhub_core::types::EventId;
use bookhub_service::event::{CreateEventRequest, UpdateEventRequest};

use crate::dto::response::{EventResponse, InterestResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /event
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let event = state.event_service.create_event(req).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// GET /event
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = state.event_service.list_events().await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// PUT /event/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.event_service.update_event(id, req).await?;
    Ok(Json(event.into()))
}

/// DELETE /event/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<StatusCode, AppError> {
    state.event_service.delete_event(id).await?;
    Ok(StatusCode::OK)
}

/// POST /event/{id}/interest
pub async fn register_interest(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EventId>,
) -> Result<(StatusCode, Json<InterestResponse>), AppError> {
    let entry = state
        .event_service
        .register_interest(user.context(), id)
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}
