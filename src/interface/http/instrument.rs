use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use super::handlers::AppState;

/// Routes that expose the recorder itself; they stay out of the data they
/// serve.
const UNMEASURED: &[&str] = &["/metrics", "/api/health"];

/// Middleware wrapping every request in a measurement: wall clock and
/// energy counter before, `record_metrics` after. The endpoint label is
/// the matched route template so parameterized paths collapse into one
/// key.
pub async fn instrument(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let endpoint = match req.extensions().get::<MatchedPath>() {
        Some(path) => path.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    if UNMEASURED.contains(&endpoint.as_str()) {
        return next.run(req).await;
    }

    let begun = state.metering.start_measurement().await;
    let response = next.run(req).await;
    state
        .metering
        .record_metrics(&endpoint, begun.start_ns, begun.energy_start)
        .await;

    response
}
