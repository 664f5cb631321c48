//! Booking and cancellation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bookhub_core::error::AppError;
use bookhub_core::types::{EventId, ReservationId};

use crate::dto::request::BookSlotRequest;
use crate::dto::response::ReservationResponse;
use crate::extractors::{AdminUser, AuthUser};
use crate::state::AppState;

/// POST /schedule-event
pub async fn book_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let reservation = state
        .coordinator
        .book_slot(user.context(), req.event_id, req.slot_at)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /schedule-event/{user_sid}
pub async fn list_reservations(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_sid): Path<String>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let reservations = state.coordinator.list_reservations(&user_sid).await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// DELETE /schedule-event/{event_id}
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<EventId>,
) -> Result<StatusCode, AppError> {
    state
        .coordinator
        .cancel_booking(user.context(), event_id)
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /schedule-event/admin-cancel/{id}
pub async fn admin_cancel(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ReservationId>,
) -> Result<StatusCode, AppError> {
    state.coordinator.admin_cancel(id).await?;
    Ok(StatusCode::OK)
}
