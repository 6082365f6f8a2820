use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{read_json, IntegrationResult};
use crate::config::ProviderConfig;
use crate::error::AppError;
use crate::flags::{FeatureFlag, FeatureFlagGate};

const PROVIDER: &str = "crm";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub id: i64,
    pub name: String,
    pub pipeline_id: i64,
    #[serde(alias = "order_nr")]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
struct StagesEnvelope {
    #[serde(default)]
    data: Vec<PipelineStage>,
}

/// Booking details pushed to the CRM as a lead.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadSync {
    pub booking_id: Uuid,
    pub client_name: String,
    pub stage_id: Option<i64>,
}

/// Read-only client for the CRM pipeline API.
#[derive(Clone)]
pub struct CrmClient {
    http: Client,
    config: ProviderConfig,
}

impl CrmClient {
    pub fn new(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    /// Pipeline stages sorted by board order.
    pub async fn pipeline_stages(
        &self,
        gate: &FeatureFlagGate,
    ) -> Result<IntegrationResult<Vec<PipelineStage>>, AppError> {
        if !gate.is_enabled(FeatureFlag::EnableCrmLive).await? {
            debug!("crm live disabled, pipeline stages stubbed");
            return Ok(IntegrationResult::stubbed(
                "CRM is not connected; pipeline stages are unavailable",
            ));
        }

        let base_url = self.config.base_url.as_deref().ok_or(AppError::MissingConfig("CRM_BASE_URL"))?;
        let token = self.config.api_key.as_deref().ok_or(AppError::MissingConfig("CRM_API_TOKEN"))?;

        let response = self
            .http
            .get(format!("{}/stages", base_url.trim_end_matches('/')))
            .bearer_auth(token)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "crm request failed"))?;

        let envelope: StagesEnvelope = read_json(PROVIDER, response).await?;
        let mut stages = envelope.data;
        stages.sort_by_key(|stage| (stage.pipeline_id, stage.order));

        Ok(IntegrationResult::Live { payload: stages })
    }

    pub async fn sync_lead(
        &self,
        gate: &FeatureFlagGate,
        lead: &LeadSync,
    ) -> Result<IntegrationResult<()>, AppError> {
        if !gate.is_enabled(FeatureFlag::EnableCrmLive).await? {
            debug!(
                booking_id = %lead.booking_id,
                stage_id = ?lead.stage_id,
                "crm live disabled, lead sync stubbed"
            );
            return Ok(IntegrationResult::stubbed(format!(
                "CRM is not connected; lead for {} was not synced",
                lead.client_name.trim()
            )));
        }

        Err(AppError::NotImplemented { integration: "crm lead sync" })
    }
}
