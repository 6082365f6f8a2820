use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::{FeatureFlag, FeatureFlagSnapshot, FlagStore};
use crate::error::AppError;

/// Request-scoped view of the feature flags.
///
/// Storage is read at most once per gate: the first caller performs the fetch and
/// concurrent callers wait on the same in-flight read. Build one gate per request and
/// drop it afterwards so flag changes are picked up by the next request.
///
/// A failed fetch is returned to the caller and leaves the gate empty, so a later call
/// in the same request reads storage again.
pub struct FeatureFlagGate {
    store: Arc<dyn FlagStore>,
    snapshot: OnceCell<FeatureFlagSnapshot>,
}

impl FeatureFlagGate {
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        Self {
            store,
            snapshot: OnceCell::new(),
        }
    }

    pub async fn snapshot(&self) -> Result<&FeatureFlagSnapshot, AppError> {
        self.snapshot
            .get_or_try_init(|| async {
                debug!("fetching feature flag snapshot");
                let rows = self.store.fetch_flags().await?;
                Ok::<_, AppError>(FeatureFlagSnapshot::from_rows(rows))
            })
            .await
    }

    pub async fn is_enabled(&self, flag: FeatureFlag) -> Result<bool, AppError> {
        Ok(self.snapshot().await?.is_enabled(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::testing::CountingFlagStore;
    use crate::flags::FlagRow;

    #[tokio::test]
    async fn test_flags_without_rows_are_disabled() {
        let store = Arc::new(CountingFlagStore::with_rows(vec![]));
        let gate = FeatureFlagGate::new(store);

        for flag in FeatureFlag::ALL {
            assert!(!gate.is_enabled(flag).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_enabled_rows_are_reported() {
        let store = Arc::new(CountingFlagStore::with_rows(vec![
            FlagRow { flag_name: "enableCrmLive".into(), is_enabled: true },
            FlagRow { flag_name: "enableAiCopilot".into(), is_enabled: true },
            FlagRow { flag_name: "enableAlerting".into(), is_enabled: false },
        ]));
        let gate = FeatureFlagGate::new(store);

        assert!(gate.is_enabled(FeatureFlag::EnableCrmLive).await.unwrap());
        assert!(gate.is_enabled(FeatureFlag::EnableAiCopilot).await.unwrap());
        assert!(!gate.is_enabled(FeatureFlag::EnableAlerting).await.unwrap());
    }

    #[tokio::test]
    async fn test_sequential_calls_fetch_once() {
        let store = Arc::new(CountingFlagStore::with_enabled(&[FeatureFlag::EnableAlerting]));
        let gate = FeatureFlagGate::new(store.clone());

        assert!(gate.is_enabled(FeatureFlag::EnableAlerting).await.unwrap());
        assert!(!gate.is_enabled(FeatureFlag::EnableCrmLive).await.unwrap());
        let snapshot = gate.snapshot().await.unwrap();
        assert!(snapshot.is_enabled(FeatureFlag::EnableAlerting));

        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_fetch() {
        let store = Arc::new(CountingFlagStore::with_enabled(&[FeatureFlag::EnableInvoicingLive]));
        let gate = FeatureFlagGate::new(store.clone());

        let (a, b, c) = tokio::join!(
            gate.is_enabled(FeatureFlag::EnableInvoicingLive),
            gate.is_enabled(FeatureFlag::EnableTelemetryPipelines),
            gate.snapshot(),
        );

        assert!(a.unwrap());
        assert!(!b.unwrap());
        assert!(c.is_ok());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_new_gate_reads_storage_again() {
        let store = Arc::new(CountingFlagStore::with_enabled(&[]));

        let first = FeatureFlagGate::new(store.clone());
        first.is_enabled(FeatureFlag::EnableCrmLive).await.unwrap();
        drop(first);

        let second = FeatureFlagGate::new(store.clone());
        second.is_enabled(FeatureFlag::EnableCrmLive).await.unwrap();

        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_instead_of_disabling() {
        let store = Arc::new(CountingFlagStore::failing());
        let gate = FeatureFlagGate::new(store.clone());

        let result = gate.is_enabled(FeatureFlag::EnableAlerting).await;
        assert!(matches!(result, Err(AppError::Storage(_))));

        // Nothing was cached, the next call retries.
        assert!(gate.snapshot().await.is_err());
        assert_eq!(store.calls(), 2);
    }
}
