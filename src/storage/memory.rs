//! In-memory history backend for tests and single-process runs. Keys sort
//! by (entity, timestamp), which yields the ascending window ordering the
//! trait contract requires.

use crate::error::AppError;
use crate::storage::history::{HistoryStore, SizeSample};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryHistoryStore {
    rows: RwLock<BTreeMap<(String, i64), SizeSample>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn create_table(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn put_sample(&self, sample: &SizeSample) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        rows.insert(
            (sample.entity_name.clone(), sample.timestamp),
            sample.clone(),
        );
        Ok(())
    }

    async fn query_window(
        &self,
        entity: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<SizeSample>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .range((entity.to_string(), from)..=(entity.to_string(), to))
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn max_total_size(&self, entity: &str) -> Result<i64, AppError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|s| s.entity_name == entity)
            .map(|s| s.total_size)
            .max()
            .unwrap_or(0))
    }
}
