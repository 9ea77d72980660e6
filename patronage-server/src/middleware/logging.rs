//! Request/response logging middleware.

use axum::{body::Body, middleware::Next, response::Response};
use http::{Method, Request, StatusCode};
use std::time::Instant;

/// Selects the level request/response pairs are logged at.
pub trait RequestLogger {
    /// Log one handled request.
    fn log(method: &Method, path: &str, status: StatusCode, latency_ms: u64);
}

/// Logs at `info`. Used for the user-facing routes.
#[derive(Clone, Copy, Debug)]
pub struct Logger;

impl RequestLogger for Logger {
    fn log(method: &Method, path: &str, status: StatusCode, latency_ms: u64) {
        tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "request handled"
        );
    }
}

/// Logs at `debug` only. Keeps periodic healthcheck probes out of the main
/// log stream.
#[derive(Clone, Copy, Debug)]
pub struct DebugOnlyLogger;

impl RequestLogger for DebugOnlyLogger {
    fn log(method: &Method, path: &str, status: StatusCode, latency_ms: u64) {
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "request handled"
        );
    }
}

/// Middleware that logs each request/response pair through `T`.
pub async fn log_request_response<T: RequestLogger>(
    request: Request<Body>,
    next: Next<Body>,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    T::log(
        &method,
        &path,
        response.status(),
        start.elapsed().as_millis() as u64,
    );

    response
}
