//! Generic not-found route.

use crate::error::AppError;
use axum::{http::StatusCode, response::IntoResponse};

/// 404 handler, in the service's standard error format.
pub async fn notfound_404() -> impl IntoResponse {
    AppError::new(StatusCode::NOT_FOUND, None::<String>)
}
