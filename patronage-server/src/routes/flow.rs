//! Verification flow stage routes.
//!
//! Each handler is the guard for one stage of the flow: it validates the
//! incoming [`VerificationContext`] before any UI is produced and either
//! renders the stage through its widget collaborator or redirects the visitor
//! to the stage that produces the missing parameter. Guards are stateless and
//! idempotent; nothing from the context outlives the request.

use crate::{
    app_state::AppState,
    error::AppResult,
    setups::{AuthForms, EmailVerificationWidget, OtpWidget, RenderableState, ServerSetup},
};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use patronage_core::{
    common::VerificationContext,
    flow::{EmailVerificationParams, GuardDecision, OtpStageParams},
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// GET handler for the sign-up stage. Entry point; always enterable.
#[utoipa::path(
    get,
    path = "/signup",
    responses(
        (status = 200, description = "Sign-up page rendered"),
    )
)]
pub async fn sign_up<S: ServerSetup>(State(state): State<AppState<S>>) -> AppResult<Html<String>> {
    Ok(Html(state.auth_forms.sign_up_page()))
}

/// GET handler for the login stage. Entry point; always enterable.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page rendered"),
    )
)]
pub async fn login<S: ServerSetup>(State(state): State<AppState<S>>) -> AppResult<Html<String>> {
    Ok(Html(state.auth_forms.login_page()))
}

/// GET handler for the OTP-verification stage.
///
/// The only stage with a hard precondition: without a non-empty `email` there
/// is nothing a one-time code could verify, so the visitor is steered back to
/// sign-up instead of being shown an error.
#[utoipa::path(
    get,
    path = "/verify-otp",
    params(VerificationContext),
    responses(
        (status = 200, description = "OTP entry rendered for the given email"),
        (status = 303, description = "No email in the context, redirected to sign-up"),
    )
)]
pub async fn verify_otp<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Query(context): Query<VerificationContext>,
) -> AppResult<Response> {
    match OtpStageParams::from_context(context) {
        GuardDecision::Proceed(params) => {
            let markup = state.otp_widget.render(&params.email).await?;
            Ok(Html(markup).into_response())
        }
        GuardDecision::Redirect(stage) => {
            debug!(
                stage = stage.path(),
                "verification context is missing an email, steering back"
            );

            Ok(Redirect::to(stage.path()).into_response())
        }
    }
}

/// GET handler for the email-verification stage.
///
/// No precondition: the stage is reachable from an out-of-band email link
/// that may or may not carry the address. `verified` and `error` pass through
/// to the widget unexamined.
#[utoipa::path(
    get,
    path = "/verify-email",
    params(VerificationContext),
    responses(
        (status = 200, description = "Verification status rendered, or the loading placeholder while the widget resolves"),
    )
)]
pub async fn verify_email<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Query(context): Query<VerificationContext>,
) -> AppResult<Html<String>> {
    let params = EmailVerificationParams::from_context(context);

    match state.email_verification_widget.resolve(&params).await? {
        RenderableState::Ready(markup) => Ok(Html(markup)),
        RenderableState::Pending => Ok(Html(loading_placeholder())),
    }
}

/// GET handler for the forgot-password stage. Always enterable.
#[utoipa::path(
    get,
    path = "/forgot-password",
    responses(
        (status = 200, description = "Forgot-password page rendered"),
    )
)]
pub async fn forgot_password<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<Html<String>> {
    Ok(Html(state.auth_forms.forgot_password_page()))
}

/// Query parameters of the reset-password stage.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResetPasswordQuery {
    /// Reset token from the emailed link; opaque here, validated by the form
    token: Option<String>,
}

/// GET handler for the reset-password stage. Always enterable; eligibility is
/// proven by the token the form validates, not by this guard.
#[utoipa::path(
    get,
    path = "/reset-password",
    params(ResetPasswordQuery),
    responses(
        (status = 200, description = "Reset-password page rendered"),
    )
)]
pub async fn reset_password<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Query(query): Query<ResetPasswordQuery>,
) -> AppResult<Html<String>> {
    Ok(Html(
        state.auth_forms.reset_password_page(query.token.as_deref()),
    ))
}

/// Loading shell shown while the email-verification widget's own
/// confirmation is in flight.
fn loading_placeholder() -> String {
    "<!doctype html>\
     <html lang=\"en\">\
     <head><meta charset=\"utf-8\"><title>Confirming…</title></head>\
     <body><main><p>Confirming your email address…</p></main></body>\
     </html>"
        .to_string()
}
