//! Axum router wiring.
//!
//! - `GET /healthz`: liveness
//! - `GET /metrics`: merged snapshot of every container
//! - `GET /metrics/list`: registry listing (slot kinds per prefix)
//! - anything else: 404, still tracked
//!
//! Every request passes through [`track`], which records into the
//! server's own `http` container.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use logtree_core::LogTreeError;

use crate::app_state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/metrics/list", get(metric_list))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state)
}

pub async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.snapshot() {
        Ok(tree) => Json(tree).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn metric_list(State(state): State<AppState>) -> Response {
    match state.registry().metric_list() {
        Ok(list) => Json(list).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &LogTreeError) -> Response {
    let body = json!({ "code": e.code().as_str(), "error": e.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Count, time, and classify every request.
pub async fn track(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let http = state.http();
    http.requests.inc();
    let _timer = http.latency.time();
    let attempt = http.handled.run();

    let resp = next.run(req).await;

    let status = resp.status();
    if status.is_success() || status.is_redirection() {
        attempt.succeed();
    } else {
        tracing::debug!(%status, "request recorded as failed");
        attempt.fail();
    }
    resp
}
