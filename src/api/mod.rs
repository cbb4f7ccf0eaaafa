pub mod triggers;

use crate::utils::state::AppState;
use axum::Router;
use axum::routing::post;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sample", post(triggers::sample_handler))
        .route("/drive", post(triggers::drive_handler))
        .route("/plot", post(triggers::plot_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
