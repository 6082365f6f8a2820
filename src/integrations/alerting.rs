use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DispatchOutcome;
use crate::error::AppError;
use crate::flags::{FeatureFlag, FeatureFlagGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertPayload {
    pub channel: String,
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
}

pub fn validate_alert(alert: &AlertPayload) -> Result<(), String> {
    if alert.channel.trim().is_empty() {
        return Err("Alert channel cannot be empty".to_string());
    }
    if alert.title.trim().is_empty() {
        return Err("Alert title cannot be empty".to_string());
    }
    Ok(())
}

pub async fn send_alert(gate: &FeatureFlagGate, alert: &AlertPayload) -> Result<DispatchOutcome, AppError> {
    if !gate.is_enabled(FeatureFlag::EnableAlerting).await? {
        debug!(
            channel = %alert.channel,
            severity = ?alert.severity,
            body_len = alert.body.len(),
            "alerting disabled, skipping alert"
        );
        return Ok(DispatchOutcome::skipped_stub());
    }

    Err(AppError::NotImplemented { integration: "alerting" })
}
