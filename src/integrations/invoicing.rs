use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{read_json, IntegrationResult};
use crate::config::ProviderConfig;
use crate::error::AppError;
use crate::flags::{FeatureFlag, FeatureFlagGate};

const PROVIDER: &str = "invoicing";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderDraft {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub reference: String,
    pub lines: Vec<SalesOrderLine>,
}

impl SalesOrderDraft {
    /// Order total, `None` when it does not fit in an `i64`.
    pub fn total_cents(&self) -> Option<i64> {
        self.lines.iter().try_fold(0i64, |total, line| {
            line.unit_price_cents
                .checked_mul(i64::from(line.quantity))
                .and_then(|amount| total.checked_add(amount))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: String,
    pub number: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct SalesOrderEnvelope {
    salesorder: SalesOrder,
}

// Checking the draft before anything is sent
pub fn validate_sales_order(draft: &SalesOrderDraft) -> Result<(), String> {
    if draft.customer_name.trim().is_empty() {
        return Err("Customer name cannot be empty".to_string());
    }

    if draft.lines.is_empty() {
        return Err("Sales order needs at least one line".to_string());
    }

    if draft.lines.iter().any(|line| line.quantity == 0 || line.unit_price_cents < 0) {
        return Err("Line quantities must be positive and prices non-negative".to_string());
    }

    if draft.total_cents().is_none() {
        return Err("Sales order total is too large".to_string());
    }

    Ok(())
}

#[derive(Clone)]
pub struct InvoicingClient {
    http: Client,
    config: ProviderConfig,
}

impl InvoicingClient {
    pub fn new(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    pub async fn create_sales_order(
        &self,
        gate: &FeatureFlagGate,
        draft: &SalesOrderDraft,
    ) -> Result<IntegrationResult<SalesOrder>, AppError> {
        if !gate.is_enabled(FeatureFlag::EnableInvoicingLive).await? {
            debug!(booking_id = %draft.booking_id, "invoicing live disabled, sales order stubbed");
            return Ok(IntegrationResult::stubbed(format!(
                "Invoicing is not connected; sales order {} was not created",
                draft.reference
            )));
        }

        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or(AppError::MissingConfig("INVOICING_BASE_URL"))?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfig("INVOICING_API_KEY"))?;

        let response = self
            .http
            .post(format!("{}/salesorders", base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(draft)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "invoicing request failed"))?;

        let envelope: SalesOrderEnvelope = read_json(PROVIDER, response).await?;
        info!(
            booking_id = %draft.booking_id,
            sales_order = %envelope.salesorder.number,
            total_cents = ?draft.total_cents(),
            "sales order created"
        );

        Ok(IntegrationResult::Live { payload: envelope.salesorder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::testing::gate_with;
    use std::time::Duration;

    fn draft() -> SalesOrderDraft {
        SalesOrderDraft {
            booking_id: Uuid::nil(),
            customer_name: "Coastline Tours".to_string(),
            reference: "BK-2207".to_string(),
            lines: vec![
                SalesOrderLine {
                    description: "Minibus, 3 days".to_string(),
                    quantity: 3,
                    unit_price_cents: 18_000,
                },
                SalesOrderLine {
                    description: "Driver".to_string(),
                    quantity: 1,
                    unit_price_cents: 25_000,
                },
            ],
        }
    }

    fn client() -> InvoicingClient {
        InvoicingClient::new(
            crate::integrations::http_client(Duration::from_millis(200)).unwrap(),
            ProviderConfig {
                base_url: Some("http://127.0.0.1:9".to_string()),
                api_key: Some("key".to_string()),
            },
        )
    }

    #[test]
    fn test_total_and_validation() {
        assert_eq!(draft().total_cents(), Some(79_000));
        assert!(validate_sales_order(&draft()).is_ok());

        let mut no_lines = draft();
        no_lines.lines.clear();
        assert!(validate_sales_order(&no_lines).is_err());

        let mut zero_qty = draft();
        zero_qty.lines[0].quantity = 0;
        assert!(validate_sales_order(&zero_qty).is_err());
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let mut huge = draft();
        huge.lines = vec![SalesOrderLine {
            description: "Fleet buyout".to_string(),
            quantity: 2,
            unit_price_cents: i64::MAX / 2 + 1,
        }];
        assert_eq!(huge.total_cents(), None);
        assert_eq!(
            validate_sales_order(&huge),
            Err("Sales order total is too large".to_string())
        );

        // Each line fits, the sum does not.
        let mut summed = draft();
        summed.lines[0].quantity = 1;
        summed.lines[0].unit_price_cents = i64::MAX;
        assert_eq!(summed.total_cents(), None);
        assert!(validate_sales_order(&summed).is_err());
    }

    #[tokio::test]
    async fn test_disabled_invoicing_is_stubbed() {
        let gate = gate_with(&[FeatureFlag::EnableCrmLive]);

        let result = client().create_sales_order(&gate, &draft()).await.unwrap();
        assert_eq!(
            result,
            IntegrationResult::stubbed("Invoicing is not connected; sales order BK-2207 was not created")
        );
    }

    #[tokio::test]
    async fn test_live_transport_error_is_not_stubbed() {
        let gate = gate_with(&[FeatureFlag::EnableInvoicingLive]);

        let err = client().create_sales_order(&gate, &draft()).await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }

    #[test]
    fn test_sales_order_envelope() {
        let envelope: SalesOrderEnvelope = serde_json::from_str(
            r#"{"code":0,"salesorder":{"id":"4600000","number":"SO-00012","status":"draft"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.salesorder.number, "SO-00012");
    }
}
