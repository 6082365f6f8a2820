use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod bookings;
mod flags;
mod health;
mod integrations;
mod middleware_flags;
mod query;

pub use health::health;

use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    let flag_router = Router::new()
        .route("/", get(flags::routes::snapshot))
        .route("/{name}", get(flags::routes::get));

    let booking_router = Router::new()
        .route("/board", get(bookings::routes::board))
        .route("/{id}/status", post(bookings::routes::update_status));

    let integration_router = Router::new()
        .route("/crm/pipeline", get(integrations::routes::crm_pipeline))
        .route("/crm/leads", post(integrations::routes::crm_sync_lead))
        .route("/invoicing/sales-orders", post(integrations::routes::create_sales_order))
        .route("/alerts", post(integrations::routes::send_alert))
        .route("/telemetry/events", post(integrations::routes::emit_telemetry))
        .route("/copilot/booking-summary", post(integrations::routes::booking_summary));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/flags", flag_router)
                .nest("/bookings", booking_router)
                .merge(integration_router)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    middleware_flags::with_flag_gate,
                )),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Fleet operations API"
}
