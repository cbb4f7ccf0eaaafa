use crate::error::AppError;
use crate::service;
use crate::service::InvocationOutcome;
use crate::utils::state::AppState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// POST /sample
pub async fn sample_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvocationOutcome>, AppError> {
    service::sample::run(&state).await.map(Json)
}

/// POST /drive
pub async fn drive_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvocationOutcome>, AppError> {
    service::drive::run(&state).await.map(Json)
}

/// POST /plot
pub async fn plot_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvocationOutcome>, AppError> {
    service::plot::run(&state).await.map(Json)
}
