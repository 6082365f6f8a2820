pub mod gate;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub use gate::FeatureFlagGate;
pub use store::{FlagStore, PgFlagStore};

// MODELS

/// Every toggle an integration can be gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureFlag {
    EnableCrmLive,
    EnableInvoicingLive,
    EnableAlerting,
    EnableAiCopilot,
    EnableTelemetryPipelines,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 5] = [
        FeatureFlag::EnableCrmLive,
        FeatureFlag::EnableInvoicingLive,
        FeatureFlag::EnableAlerting,
        FeatureFlag::EnableAiCopilot,
        FeatureFlag::EnableTelemetryPipelines,
    ];

    /// Name stored in the `flag_name` column.
    pub fn key(self) -> &'static str {
        match self {
            FeatureFlag::EnableCrmLive => "enableCrmLive",
            FeatureFlag::EnableInvoicingLive => "enableInvoicingLive",
            FeatureFlag::EnableAlerting => "enableAlerting",
            FeatureFlag::EnableAiCopilot => "enableAiCopilot",
            FeatureFlag::EnableTelemetryPipelines => "enableTelemetryPipelines",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }
}

/// One `(flag_name, is_enabled)` row from flag storage.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlagRow {
    pub flag_name: String,
    pub is_enabled: bool,
}

/// Value of every known flag at the time storage was read.
///
/// Flags without a row are present and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureFlagSnapshot {
    flags: BTreeMap<FeatureFlag, bool>,
}

impl FeatureFlagSnapshot {
    pub fn from_rows(rows: impl IntoIterator<Item = FlagRow>) -> Self {
        let mut flags: BTreeMap<FeatureFlag, bool> =
            FeatureFlag::ALL.into_iter().map(|flag| (flag, false)).collect();

        for row in rows {
            match FeatureFlag::from_key(&row.flag_name) {
                Some(flag) => {
                    flags.insert(flag, row.is_enabled);
                }
                None => warn!(flag_name = %row.flag_name, "ignoring unknown feature flag row"),
            }
        }

        Self { flags }
    }

    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureFlag, bool)> + '_ {
        self.flags.iter().map(|(flag, enabled)| (*flag, *enabled))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{FeatureFlag, FeatureFlagGate, FlagRow, FlagStore};
    use crate::error::AppError;

    /// In-memory store that counts how often it is read.
    #[derive(Default)]
    pub struct CountingFlagStore {
        rows: Vec<FlagRow>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl CountingFlagStore {
        pub fn with_enabled(flags: &[FeatureFlag]) -> Self {
            Self {
                rows: flags
                    .iter()
                    .map(|flag| FlagRow {
                        flag_name: flag.key().to_string(),
                        is_enabled: true,
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn with_rows(rows: Vec<FlagRow>) -> Self {
            Self { rows, ..Default::default() }
        }

        pub fn failing() -> Self {
            Self { fail: true, ..Default::default() }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FlagStore for CountingFlagStore {
        async fn fetch_flags(&self) -> Result<Vec<FlagRow>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                return Err(AppError::Storage(sqlx::Error::PoolTimedOut));
            }
            Ok(self.rows.clone())
        }
    }

    pub fn gate_with(flags: &[FeatureFlag]) -> FeatureFlagGate {
        FeatureFlagGate::new(Arc::new(CountingFlagStore::with_enabled(flags)))
    }
}
