//! Test server setup code

use crate::setups::{AuthForms, EmailVerificationWidget, OtpWidget, RenderableState, ServerSetup};
use anyhow::Result;
use async_trait::async_trait;
use patronage_core::flow::EmailVerificationParams;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct TestSetup;

impl ServerSetup for TestSetup {
    type OtpWidget = TestOtpWidget;
    type EmailVerificationWidget = TestEmailVerificationWidget;
    type AuthForms = TestAuthForms;
}

/// Records every address the guard forwards to the OTP stage.
#[derive(Debug, Clone, Default)]
pub struct TestOtpWidget {
    emails: Arc<Mutex<Vec<String>>>,
}

impl TestOtpWidget {
    pub fn rendered_emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl OtpWidget for TestOtpWidget {
    async fn render(&self, email: &str) -> Result<String> {
        self.emails.lock().unwrap().push(email.to_string());
        Ok(format!("otp-stage:{email}"))
    }
}

/// Records the parameters the guard passes through to the
/// email-verification stage. Resolution can be switched to pending to
/// exercise the placeholder path.
#[derive(Debug, Clone, Default)]
pub struct TestEmailVerificationWidget {
    params: Arc<Mutex<Vec<EmailVerificationParams>>>,
    pending: Arc<Mutex<bool>>,
}

impl TestEmailVerificationWidget {
    pub fn resolved_params(&self) -> Vec<EmailVerificationParams> {
        self.params.lock().unwrap().clone()
    }

    pub fn set_pending(&self, pending: bool) {
        *self.pending.lock().unwrap() = pending;
    }
}

#[async_trait]
impl EmailVerificationWidget for TestEmailVerificationWidget {
    async fn resolve(&self, params: &EmailVerificationParams) -> Result<RenderableState> {
        self.params.lock().unwrap().push(params.clone());

        if *self.pending.lock().unwrap() {
            Ok(RenderableState::Pending)
        } else {
            Ok(RenderableState::Ready(format!(
                "email-verification-stage:{}",
                params.email
            )))
        }
    }
}

/// Marker pages for the entry-point stages; records reset tokens passed
/// through to the reset form.
#[derive(Debug, Clone, Default)]
pub struct TestAuthForms {
    reset_tokens: Arc<Mutex<Vec<Option<String>>>>,
}

impl TestAuthForms {
    pub fn reset_tokens(&self) -> Vec<Option<String>> {
        self.reset_tokens.lock().unwrap().clone()
    }
}

impl AuthForms for TestAuthForms {
    fn sign_up_page(&self) -> String {
        "sign-up-stage".to_string()
    }

    fn login_page(&self) -> String {
        "login-stage".to_string()
    }

    fn forgot_password_page(&self) -> String {
        "forgot-password-stage".to_string()
    }

    fn reset_password_page(&self, token: Option<&str>) -> String {
        self.reset_tokens
            .lock()
            .unwrap()
            .push(token.map(String::from));
        "reset-password-stage".to_string()
    }
}
