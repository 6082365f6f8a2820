use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::FlagRow;
use crate::error::AppError;

/// Row source for feature flags.
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn fetch_flags(&self) -> Result<Vec<FlagRow>, AppError>;
}

#[derive(Clone)]
pub struct PgFlagStore {
    db: PgPool,
}

impl PgFlagStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlagStore for PgFlagStore {
    async fn fetch_flags(&self) -> Result<Vec<FlagRow>, AppError> {
        let rows = sqlx::query_as::<_, FlagRow>(
            r#"
            SELECT flag_name, is_enabled
            FROM feature_flags
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        debug!(rows = rows.len(), "loaded feature flag rows");
        Ok(rows)
    }
}
