//! Main [axum::Router] interface for webserver.

use crate::{
    app_state::AppState,
    middleware::logging::{log_request_response, DebugOnlyLogger, Logger},
    routes::{fallback::notfound_404, flow, health, ping},
    setups::ServerSetup,
};
use axum::{routing::get, Router};
use patronage_core::flow::Stage;
use tower_http::cors::{Any, CorsLayer};

/// Setup main router for application.
pub fn setup_app_router<S: ServerSetup>(app_state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT])
        .allow_origin(Any);

    let mut router = Router::new()
        .route(Stage::SignUp.path(), get(flow::sign_up::<S>))
        .route(Stage::Login.path(), get(flow::login::<S>))
        .route(Stage::OtpVerification.path(), get(flow::verify_otp::<S>))
        .route(
            Stage::EmailVerification.path(),
            get(flow::verify_email::<S>),
        )
        .route(
            Stage::ForgotPassword.path(),
            get(flow::forgot_password::<S>),
        )
        .route(Stage::ResetPassword.path(), get(flow::reset_password::<S>))
        .layer(cors)
        .route("/ping", get(ping::get))
        .fallback(notfound_404)
        .with_state(app_state);

    // Logging layer
    router = router.layer(axum::middleware::from_fn(log_request_response::<Logger>));

    // Healthcheck layer
    let mut healthcheck_router = Router::new().route("/healthcheck", get(health::healthcheck));

    healthcheck_router = healthcheck_router.layer(axum::middleware::from_fn(
        log_request_response::<DebugOnlyLogger>,
    ));

    Router::merge(router, healthcheck_router)
}
