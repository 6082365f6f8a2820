use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::DispatchOutcome;
use crate::error::AppError;
use crate::flags::{FeatureFlag, FeatureFlagGate};

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub occurred_at: Option<DateTime<Utc>>,
}

pub async fn emit_event(gate: &FeatureFlagGate, event: &TelemetryEvent) -> Result<DispatchOutcome, AppError> {
    if !gate.is_enabled(FeatureFlag::EnableTelemetryPipelines).await? {
        debug!(
            event = %event.name,
            source = %event.source,
            attributes = event.attributes.len(),
            occurred_at = ?event.occurred_at,
            "telemetry pipelines disabled, dropping event"
        );
        return Ok(DispatchOutcome::skipped_stub());
    }

    Err(AppError::NotImplemented { integration: "telemetry" })
}
