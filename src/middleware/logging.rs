//! Logging middleware
//!
//! Records method, path, status and latency for every HTTP request.

use std::time::Instant;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn, error, Instrument};

/// Requests slower than this are reported at warn level
const SLOW_REQUEST_MS: u128 = 1000;

/// Request logging middleware, installed with `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("request", method = %method, path = %path);

    let started = Instant::now();
    let response = next.run(request).instrument(span).await;
    let duration_ms = started.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        error!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request failed");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request handled");
    }

    if duration_ms > SLOW_REQUEST_MS {
        warn!(method = %method, path = %path, duration_ms = duration_ms, "Slow request detected");
    }

    response
}
