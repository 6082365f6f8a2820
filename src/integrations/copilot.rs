use serde::Deserialize;
use tracing::debug;

use super::IntegrationResult;
use crate::error::AppError;
use crate::flags::{FeatureFlag, FeatureFlagGate};

#[derive(Debug, Clone, Deserialize)]
pub struct BookingSummaryRequest {
    pub lead_id: String,
    pub client_name: String,
    #[serde(default)]
    pub itinerary: Vec<String>,
}

/// Placeholder shown in place of a generated summary.
pub fn placeholder_summary(request: &BookingSummaryRequest) -> String {
    let itinerary = if request.itinerary.is_empty() {
        "no itinerary provided".to_string()
    } else {
        request.itinerary.join(" -> ")
    };

    format!(
        "{} (lead {}): {}. AI summaries are off, showing the itinerary as entered.",
        request.client_name.trim(),
        request.lead_id,
        itinerary
    )
}

pub async fn summarize_booking(
    gate: &FeatureFlagGate,
    request: &BookingSummaryRequest,
) -> Result<IntegrationResult<String>, AppError> {
    if !gate.is_enabled(FeatureFlag::EnableAiCopilot).await? {
        debug!(lead_id = %request.lead_id, "ai copilot disabled, returning placeholder summary");
        return Ok(IntegrationResult::stubbed(placeholder_summary(request)));
    }

    Err(AppError::NotImplemented { integration: "ai copilot" })
}
