//! The Axum Application State

use crate::{settings, setups::ServerSetup};
use anyhow::{anyhow, Result};
use std::sync::Arc;

#[derive(Clone)]
/// Global application route state.
pub struct AppState<S: ServerSetup> {
    /// Platform presentation settings threaded into the stage widgets
    pub platform: Arc<settings::Platform>,
    /// The widget that renders the OTP-entry stage
    pub otp_widget: S::OtpWidget,
    /// The widget that resolves and renders the email-verification stage
    pub email_verification_widget: S::EmailVerificationWidget,
    /// The collaborator that renders the flow's entry-point forms
    pub auth_forms: S::AuthForms,
}

/// Builder for [`AppState`]
pub struct AppStateBuilder<S: ServerSetup> {
    platform: Option<settings::Platform>,
    otp_widget: Option<S::OtpWidget>,
    email_verification_widget: Option<S::EmailVerificationWidget>,
    auth_forms: Option<S::AuthForms>,
}

impl<S: ServerSetup> Default for AppStateBuilder<S> {
    fn default() -> Self {
        Self {
            platform: None,
            otp_widget: None,
            email_verification_widget: None,
            auth_forms: None,
        }
    }
}

impl<S: ServerSetup> AppStateBuilder<S> {
    /// Finalize the builder and return the [`AppState`]
    pub fn finalize(self) -> Result<AppState<S>> {
        let platform = self
            .platform
            .ok_or_else(|| anyhow!("platform settings are required"))?;

        let otp_widget = self
            .otp_widget
            .ok_or_else(|| anyhow!("otp_widget is required"))?;

        let email_verification_widget = self
            .email_verification_widget
            .ok_or_else(|| anyhow!("email_verification_widget is required"))?;

        let auth_forms = self
            .auth_forms
            .ok_or_else(|| anyhow!("auth_forms is required"))?;

        Ok(AppState {
            platform: Arc::new(platform),
            otp_widget,
            email_verification_widget,
            auth_forms,
        })
    }

    /// Set the platform presentation settings
    pub fn with_platform(mut self, platform: settings::Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set the OTP-entry widget
    pub fn with_otp_widget(mut self, otp_widget: S::OtpWidget) -> Self {
        self.otp_widget = Some(otp_widget);
        self
    }

    /// Set the email-verification widget
    pub fn with_email_verification_widget(
        mut self,
        email_verification_widget: S::EmailVerificationWidget,
    ) -> Self {
        self.email_verification_widget = Some(email_verification_widget);
        self
    }

    /// Set the entry-point forms collaborator
    pub fn with_auth_forms(mut self, auth_forms: S::AuthForms) -> Self {
        self.auth_forms = Some(auth_forms);
        self
    }
}

impl<S> std::fmt::Debug for AppStateBuilder<S>
where
    S: ServerSetup,
    S::OtpWidget: std::fmt::Debug,
    S::EmailVerificationWidget: std::fmt::Debug,
    S::AuthForms: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateBuilder")
            .field("platform", &self.platform)
            .field("otp_widget", &self.otp_widget)
            .field("email_verification_widget", &self.email_verification_widget)
            .field("auth_forms", &self.auth_forms)
            .finish()
    }
}

impl<S> std::fmt::Debug for AppState<S>
where
    S: ServerSetup,
    S::OtpWidget: std::fmt::Debug,
    S::EmailVerificationWidget: std::fmt::Debug,
    S::AuthForms: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("platform", &self.platform)
            .field("otp_widget", &self.otp_widget)
            .field("email_verification_widget", &self.email_verification_widget)
            .field("auth_forms", &self.auth_forms)
            .finish()
    }
}
