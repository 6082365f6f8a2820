use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    database: &'static str,
}

/// Liveness plus a round trip to the database. Always answers 200 so the caller can
/// read which dependency is down.
pub async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!(error = %e, "health check could not reach the database");
            "unreachable"
        }
    };

    Json(HealthData { status: StatusCode::OK.as_u16(), database })
}
