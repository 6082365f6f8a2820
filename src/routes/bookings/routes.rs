use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;

use super::{queries, BoardResponse, UpdateStatusRequest};
use crate::bookings::BookingStatus;
use crate::error::AppError;
use crate::routes::query::first_query_value;
use crate::state::AppState;

/// Booking board for the role picked by `?view=`
pub async fn board(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = queries::list_bookings(&state.db).await?;

    Ok(Json(BoardResponse::for_view(first_query_value(&params, "view"), rows)))
}

/// Move a booking to another lifecycle status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = queries::get_status(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let current = BookingStatus::parse(&current)
        .ok_or_else(|| AppError::Conflict(format!("Booking has unknown status '{}'", current)))?;

    if current.is_terminal() {
        return Err(AppError::Conflict(format!("Booking is already {}", current.as_str())));
    }

    if !current.can_transition_to(payload.status) {
        return Err(AppError::Conflict(format!(
            "Cannot move booking from {} to {}",
            current.as_str(),
            payload.status.as_str()
        )));
    }

    let row = queries::update_status(&state.db, id, current, payload.status)
        .await?
        .ok_or_else(|| AppError::Conflict("Booking status changed, reload and try again".to_string()))?;

    info!(booking_id = %id, from = current.as_str(), to = payload.status.as_str(), "booking status changed");

    let card = row
        .into_card()
        .ok_or_else(|| AppError::Conflict("Booking has unknown status".to_string()))?;

    Ok(Json(card))
}
