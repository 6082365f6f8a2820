use std::sync::Arc;

use sqlx::PgPool;

use crate::flags::FlagStore;
use crate::integrations::{crm::CrmClient, invoicing::InvoicingClient};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub flag_store: Arc<dyn FlagStore>,
    pub crm: CrmClient,
    pub invoicing: InvoicingClient,
}
