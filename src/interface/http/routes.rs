use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::application::MeteringService;

use super::handlers::{health_handler, metrics_handler, sleep_handler, work_handler, AppState};
use super::instrument::instrument;

pub fn create_router(metering: Arc<MeteringService>) -> Router {
    let state = AppState { metering };

    Router::new()
        // Measured demo endpoints
        .route("/api/work", get(work_handler))
        .route("/api/sleep", get(sleep_handler))
        // Recorder surface
        .route("/metrics", get(metrics_handler))
        .route("/api/health", get(health_handler))
        .layer(middleware::from_fn_with_state(state.clone(), instrument))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
