//! This abstracts the flow's rendering collaborators into "setups".
//!
//! This module defines the traits, submodules define test & production
//! collections of implementations.
use anyhow::Result;
use async_trait::async_trait;
use patronage_core::flow::EmailVerificationParams;

pub mod prod;
#[cfg(test)]
pub mod test;

/// This trait groups type parameters to the server's `AppState` struct.
///
/// It captures the setup of the server, distinguishing between e.g.
/// unit testing & production setups.
pub trait ServerSetup: Clone + Send + Sync + 'static {
    /// Which implementation renders the OTP-entry stage
    type OtpWidget: OtpWidget;
    /// Which implementation resolves the email-verification stage
    type EmailVerificationWidget: EmailVerificationWidget;
    /// Which implementation renders the flow's entry-point forms
    type AuthForms: AuthForms;
}

/// The widget that renders the one-time-code entry screen.
///
/// It receives a validated non-empty email address from the stage guard and
/// owns everything about the code itself, including its validation.
#[async_trait]
pub trait OtpWidget: Clone + Send + Sync + 'static {
    /// Render the OTP-entry screen for the given address.
    async fn render(&self, email: &str) -> Result<String>;
}

/// What the email-verification widget produced for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderableState {
    /// Content is ready to ship.
    Ready(String),
    /// The widget's own confirmation is still in flight; the stage shows its
    /// loading placeholder instead.
    Pending,
}

/// The widget that confirms and renders the email-verification screen.
#[async_trait]
pub trait EmailVerificationWidget: Clone + Send + Sync + 'static {
    /// Resolve the widget's asynchronous confirmation work for the given
    /// parameters. Dropping the returned future cancels the resolution;
    /// there is no shared state to roll back.
    async fn resolve(&self, params: &EmailVerificationParams) -> Result<RenderableState>;
}

/// Renders the flow's entry-point pages.
///
/// These pages receive no guard-provided context; they originate the flow.
pub trait AuthForms: Clone + Send + Sync + 'static {
    /// The sign-up page.
    fn sign_up_page(&self) -> String;
    /// The login page.
    fn login_page(&self) -> String;
    /// The forgot-password page.
    fn forgot_password_page(&self) -> String;
    /// The reset-password page. The token, when present, is opaque at this
    /// layer and validated by the form itself.
    fn reset_password_page(&self, token: Option<&str>) -> String;
}
