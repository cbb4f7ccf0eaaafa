//! Scripted object workload. Steps are separated by a fixed delay so an
//! independently scheduled sampler can observe the intermediate states.

use crate::error::AppError;
use crate::service::InvocationOutcome;
use crate::utils::state::AppState;
use tokio::time::{Duration, sleep};

/// Run the fixed mutation script, then fire one POST at the plot endpoint.
/// The first failing step aborts the rest of the script.
pub async fn run(state: &AppState) -> Result<InvocationOutcome, AppError> {
    let bucket = &state.config.bucket;
    let delay = Duration::from_secs(state.config.step_delay_secs);
    let store = &state.object_store;

    store
        .put_object(bucket, "assignment1.txt", b"Empty Assignment 1")
        .await?;
    tracing::info!("object `assignment1.txt` created");
    sleep(delay).await;

    store
        .put_object(bucket, "assignment1.txt", b"Empty Assignment 2")
        .await?;
    tracing::info!("object `assignment1.txt` updated");
    sleep(delay).await;

    store.delete_object(bucket, "assignment1.txt").await?;
    tracing::info!("object `assignment1.txt` deleted");
    sleep(delay).await;

    store.put_object(bucket, "assignment2.txt", b"21").await?;
    tracing::info!("object `assignment2.txt` created");
    sleep(delay).await;

    // Fire-and-forget trigger: only the status code is observed.
    let resp = state.http.post(&state.config.plot_url).send().await?;
    tracing::info!(status = %resp.status(), "plot endpoint invoked");

    Ok(InvocationOutcome::ok(
        "drive script completed and plot endpoint invoked",
    ))
}
