//! Bucket size sampling: aggregate the listing, append one history row.

use crate::error::AppError;
use crate::service::InvocationOutcome;
use crate::storage::history::SizeSample;
use crate::utils::state::AppState;
use chrono::Utc;

/// Sum the sizes of every object in the data bucket. An empty bucket
/// yields (0, 0).
pub async fn calculate_size(state: &AppState) -> Result<(i64, i64), AppError> {
    let objects = state.object_store.list_objects(&state.config.bucket).await?;
    let total = objects.iter().map(|o| o.size).sum();
    Ok((total, objects.len() as i64))
}

/// Append one history row stamped with the current UTC second. Two calls
/// within the same second land on the same sort key and the second wins.
pub async fn record_size(
    state: &AppState,
    total_size: i64,
    object_count: i64,
) -> Result<SizeSample, AppError> {
    let now = Utc::now();
    let sample = SizeSample {
        entity_name: state.config.bucket.clone(),
        timestamp: now.timestamp(),
        timestamp_string: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        total_size,
        object_count,
    };
    state.history.put_sample(&sample).await?;
    tracing::info!(
        entity = %sample.entity_name,
        total_size,
        object_count,
        "size sample recorded"
    );
    Ok(sample)
}

pub async fn run(state: &AppState) -> Result<InvocationOutcome, AppError> {
    let (total_size, object_count) = calculate_size(state).await?;
    record_size(state, total_size, object_count).await?;
    Ok(InvocationOutcome::ok(format!(
        "recorded sample: totalSize={total_size} objectCount={object_count}"
    )))
}
