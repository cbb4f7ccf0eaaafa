//! Best-effort provisioning of the data bucket and the history table.

use crate::error::AppError;
use crate::service::InvocationOutcome;
use crate::utils::state::AppState;

/// Create the bucket, then the table. Provider faults are logged and the
/// run continues; partial success is left as-is (no rollback).
pub async fn run(state: &AppState) -> Result<InvocationOutcome, AppError> {
    match state.object_store.create_bucket(&state.config.bucket).await {
        Ok(()) => tracing::info!(bucket = %state.config.bucket, "bucket created"),
        Err(e) => tracing::error!(bucket = %state.config.bucket, "error creating bucket: {e}"),
    }

    match state.history.create_table().await {
        Ok(()) => tracing::info!(table = %state.config.table, "table created and active"),
        Err(e) => tracing::error!(table = %state.config.table, "error creating table: {e}"),
    }

    Ok(InvocationOutcome::ok("provisioning completed"))
}
