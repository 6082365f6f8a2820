//! Flag-gated calls to external systems.
//!
//! Every integration checks its flag through the request's [`FeatureFlagGate`]. With
//! the flag off it returns a deterministic stub and makes no network call. With the
//! flag on it performs the live call, or fails with [`AppError::NotImplemented`] when
//! no live path exists yet. Live errors are returned as-is and never retried.
//!
//! [`FeatureFlagGate`]: crate::flags::FeatureFlagGate

pub mod alerting;
pub mod copilot;
pub mod crm;
pub mod invoicing;
pub mod telemetry;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::error::AppError;

/// Outcome of a content or data call: a stub note, or what the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IntegrationResult<T> {
    Stubbed { note: String },
    Live { payload: T },
}

impl<T> IntegrationResult<T> {
    pub fn stubbed(note: impl Into<String>) -> Self {
        IntegrationResult::Stubbed { note: note.into() }
    }

    pub fn is_stubbed(&self) -> bool {
        matches!(self, IntegrationResult::Stubbed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    Stubbed,
}

/// Outcome of a fire-and-forget call such as an alert or a telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    pub mode: DispatchMode,
}

impl DispatchOutcome {
    pub fn skipped_stub() -> Self {
        Self {
            status: DispatchStatus::Skipped,
            mode: DispatchMode::Stubbed,
        }
    }
}

pub fn http_client(timeout: Duration) -> Result<Client, AppError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Decodes a provider response, turning non-2xx statuses into [`AppError::Provider`].
async fn read_json<T: DeserializeOwned>(provider: &'static str, response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(provider, status = status.as_u16(), error = %e, "could not read provider error body");
                String::new()
            }
        };
        return Err(AppError::Provider {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<T>().await?)
}
