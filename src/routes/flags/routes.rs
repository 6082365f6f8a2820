use axum::{extract::Path, response::IntoResponse, Json};
use tracing::debug;

use super::flag_state;
use crate::error::AppError;
use crate::routes::middleware_flags::FlagGate;

/// Current value of every feature flag
pub async fn snapshot(FlagGate(gate): FlagGate) -> Result<impl IntoResponse, AppError> {
    let snapshot = gate.snapshot().await?;
    debug!(enabled = snapshot.iter().filter(|(_, on)| *on).count(), "serving flag snapshot");
    Ok(Json(snapshot.clone()))
}

/// Value of a single flag by its stored name
pub async fn get(FlagGate(gate): FlagGate, Path(name): Path<String>) -> Result<impl IntoResponse, AppError> {
    let snapshot = gate.snapshot().await?;
    Ok(Json(flag_state(&name, |flag| snapshot.is_enabled(flag))))
}
