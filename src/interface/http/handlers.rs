use std::sync::Arc;
use std::time::Duration;

use axum::{
    debug_handler,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::application::MeteringService;

/// Upper bounds on the demo workload, so a stray query cannot pin the
/// process.
const MAX_WORK_ITERS: u64 = 500_000_000;
const MAX_SLEEP_MS: u64 = 10_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metering: Arc<MeteringService>,
}

/// Query params for GET /api/work
#[derive(Debug, Deserialize)]
pub struct WorkQuery {
    #[serde(default = "default_iters")]
    pub iters: u64,
}

fn default_iters() -> u64 {
    5_000_000
}

/// Query params for GET /api/sleep
#[derive(Debug, Deserialize)]
pub struct SleepQuery {
    #[serde(default = "default_sleep_ms")]
    pub ms: u64,
}

fn default_sleep_ms() -> u64 {
    100
}

/// Handler for GET /api/health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "wattmon"
        })),
    )
}

/// Handler for GET /metrics: the full snapshot as
/// `endpoint -> [{start, end, energy_start, energy_end}]`. A metering
/// subsystem that was never initialized answers 503, distinct from an
/// initialized-but-empty `{}`.
#[debug_handler]
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metering.snapshot() {
        Ok(samples) => (StatusCode::OK, Json(samples)).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

/// Handler for GET /api/work: a measured endpoint that spins the CPU so
/// the energy counter has something to charge against.
#[debug_handler]
pub async fn work_handler(Query(params): Query<WorkQuery>) -> (StatusCode, Json<serde_json::Value>) {
    let iters = params.iters.min(MAX_WORK_ITERS);

    let checksum = tokio::task::spawn_blocking(move || {
        let mut acc: u64 = 0;
        for i in 0..iters {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        acc
    })
    .await
    .unwrap_or_default();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "iters": iters,
            "checksum": checksum
        })),
    )
}

/// Handler for GET /api/sleep: a measured endpoint that idles, giving an
/// energy baseline to compare `/api/work` against.
#[debug_handler]
pub async fn sleep_handler(
    Query(params): Query<SleepQuery>,
) -> (StatusCode, Json<serde_json::Value>) {
    let ms = params.ms.min(MAX_SLEEP_MS);
    tokio::time::sleep(Duration::from_millis(ms)).await;

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "slept_ms": ms
        })),
    )
}
