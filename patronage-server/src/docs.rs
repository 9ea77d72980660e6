//! OpenAPI doc generation.

use crate::{
    error::AppError,
    routes::{flow, health, ping},
};
use patronage_core::common::VerificationContext;
use utoipa::OpenApi;

/// API documentation generator.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck,
        ping::get,
        flow::sign_up,
        flow::login,
        flow::verify_otp,
        flow::verify_email,
        flow::forgot_password,
        flow::reset_password,
    ),
    components(
        schemas(
            AppError,
            VerificationContext,
            health::HealthcheckResponse
        )
    )
)]
/// Tied to OpenAPI documentation.
#[derive(Debug)]
pub struct ApiDoc;
