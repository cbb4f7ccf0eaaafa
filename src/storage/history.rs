use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// One appended row of the size history. Serialized names mirror the
/// persisted column layout: `entityName` is the partition key and
/// `timestamp` (epoch seconds) the sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSample {
    pub entity_name: String,
    pub timestamp: i64,
    pub timestamp_string: String,
    pub total_size: i64,
    pub object_count: i64,
}

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Create the history table and wait until it is ready for writes.
    async fn create_table(&self) -> Result<(), AppError>;
    /// Append one sample. A second write with the same (entity, timestamp)
    /// replaces the first.
    async fn put_sample(&self, sample: &SizeSample) -> Result<(), AppError>;
    /// Samples for `entity` with timestamp in `[from, to]`, ascending.
    async fn query_window(
        &self,
        entity: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<SizeSample>, AppError>;
    /// All-time maximum of `totalSize` for `entity`, 0 when no rows exist.
    async fn max_total_size(&self, entity: &str) -> Result<i64, AppError>;
}
