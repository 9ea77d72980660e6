//! Runtime middleware helpers.

use crate::error::{AppError, ErrorResponse};
use http::{header, HeaderValue, Response, StatusCode};
use hyper::Body;
use std::any::Any;

/// Converts runtime panics into `500 Internal Server Error` responses in the
/// service's standard error format.
pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(detail = %detail, "handler panicked");

    let error = AppError::new(StatusCode::INTERNAL_SERVER_ERROR, Some(detail));
    let body = serde_json::to_string(&ErrorResponse::from(error)).unwrap_or_default();

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )
        .body(Body::from(body))
        .expect("panic response is statically well-formed")
}
