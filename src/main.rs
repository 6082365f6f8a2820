mod bookings;
mod config;
mod error;
mod flags;
mod integrations;
mod routes;
mod state;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::flags::PgFlagStore;
use crate::integrations::{crm::CrmClient, http_client, invoicing::InvoicingClient};

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = config::Config::from_env().expect("Invalid configuration");

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("Error connecting DB");

    let http = http_client(config.http_timeout).expect("Error building HTTP client");

    let state = state::AppState {
        flag_store: Arc::new(PgFlagStore::new(db.clone())),
        crm: CrmClient::new(http.clone(), config.crm.clone()),
        invoicing: InvoicingClient::new(http, config.invoicing.clone()),
        db,
    };

    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .expect("Error binding listener");

    info!(addr = %config.addr(), "fleet-ops listening");

    axum::serve(listener, app).await.expect("Server error");
}
