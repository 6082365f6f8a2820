use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::error::AppError;
use crate::integrations::{
    alerting::{self, AlertPayload},
    copilot::{self, BookingSummaryRequest},
    crm::LeadSync,
    invoicing::{validate_sales_order, SalesOrderDraft},
    telemetry::{self, TelemetryEvent},
};
use crate::routes::middleware_flags::FlagGate;
use crate::state::AppState;

/// CRM pipeline stages
pub async fn crm_pipeline(
    State(state): State<AppState>,
    FlagGate(gate): FlagGate,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.crm.pipeline_stages(&gate).await?))
}

/// Push a booking to the CRM as a lead
pub async fn crm_sync_lead(
    State(state): State<AppState>,
    FlagGate(gate): FlagGate,
    Json(payload): Json<LeadSync>,
) -> Result<impl IntoResponse, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError::BadRequest("Client name cannot be empty".to_string()));
    }

    Ok(Json(state.crm.sync_lead(&gate, &payload).await?))
}

/// Create a sales order in the invoicing system
pub async fn create_sales_order(
    State(state): State<AppState>,
    FlagGate(gate): FlagGate,
    Json(payload): Json<SalesOrderDraft>,
) -> Result<impl IntoResponse, AppError> {
    validate_sales_order(&payload).map_err(AppError::BadRequest)?;

    let result = state.invoicing.create_sales_order(&gate, &payload).await?;
    let status = if result.is_stubbed() { StatusCode::OK } else { StatusCode::CREATED };

    Ok((status, Json(result)))
}

pub async fn send_alert(
    FlagGate(gate): FlagGate,
    Json(payload): Json<AlertPayload>,
) -> Result<impl IntoResponse, AppError> {
    alerting::validate_alert(&payload).map_err(AppError::BadRequest)?;
    Ok((StatusCode::ACCEPTED, Json(alerting::send_alert(&gate, &payload).await?)))
}

pub async fn emit_telemetry(
    FlagGate(gate): FlagGate,
    Json(payload): Json<TelemetryEvent>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Event name cannot be empty".to_string()));
    }

    Ok((StatusCode::ACCEPTED, Json(telemetry::emit_event(&gate, &payload).await?)))
}

/// Summary text for a booking lead
pub async fn booking_summary(
    FlagGate(gate): FlagGate,
    Json(payload): Json<BookingSummaryRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(copilot::summarize_booking(&gate, &payload).await?))
}
