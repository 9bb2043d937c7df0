//! Logging middleware
//!
//! This module provides request logging for the HTTP API: method, path,
//! status and latency of every request.

use std::time::Instant;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

/// Log each request once it has produced a response
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration_ms,
            "Request handled"
        );
    }

    response
}
