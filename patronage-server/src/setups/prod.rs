//! Production server setup code

use crate::{
    settings,
    setups::{AuthForms, EmailVerificationWidget, OtpWidget, RenderableState, ServerSetup},
};
use anyhow::Result;
use async_trait::async_trait;
use patronage_core::flow::{EmailVerificationParams, Stage};

/// Production collection of collaborator implementations.
#[derive(Clone, Debug)]
pub struct ProdSetup;

impl ServerSetup for ProdSetup {
    type OtpWidget = HtmlOtpWidget;
    type EmailVerificationWidget = HtmlEmailVerificationWidget;
    type AuthForms = HtmlAuthForms;
}

/// HTML shell for the OTP-entry stage.
///
/// The full form markup ships with the platform's frontend bundle; this shell
/// only carries the state the guard forwards.
#[derive(Clone, Debug)]
pub struct HtmlOtpWidget {
    platform_name: String,
}

impl HtmlOtpWidget {
    /// Build the widget from platform settings.
    pub fn new(platform: &settings::Platform) -> Self {
        Self {
            platform_name: platform.name.clone(),
        }
    }
}

#[async_trait]
impl OtpWidget for HtmlOtpWidget {
    async fn render(&self, email: &str) -> Result<String> {
        let email = escape_html(email);
        Ok(page(
            &self.platform_name,
            "Enter your one-time code",
            &format!(
                "<p>We sent a code to <strong>{email}</strong>.</p>\
                 <form method=\"post\" action=\"/api/v0/auth/otp\">\
                 <input type=\"hidden\" name=\"email\" value=\"{email}\">\
                 <input name=\"code\" inputmode=\"numeric\" autocomplete=\"one-time-code\">\
                 <button type=\"submit\">Verify</button>\
                 </form>"
            ),
        ))
    }
}

/// HTML shell for the email-verification stage.
#[derive(Clone, Debug)]
pub struct HtmlEmailVerificationWidget {
    platform_name: String,
    support_email: String,
}

impl HtmlEmailVerificationWidget {
    /// Build the widget from platform settings.
    pub fn new(platform: &settings::Platform) -> Self {
        Self {
            platform_name: platform.name.clone(),
            support_email: platform.support_email.clone(),
        }
    }
}

#[async_trait]
impl EmailVerificationWidget for HtmlEmailVerificationWidget {
    async fn resolve(&self, params: &EmailVerificationParams) -> Result<RenderableState> {
        let email = escape_html(&params.email);

        let status_line = match (params.verified, params.error.as_deref()) {
            (_, Some(error)) => format!(
                "<p>Verification failed: {}.</p><p>Contact {} if the problem persists.</p>",
                escape_html(error),
                escape_html(&self.support_email)
            ),
            (Some(true), None) => format!("<p><strong>{email}</strong> is verified.</p>"),
            (Some(false), None) => {
                format!("<p><strong>{email}</strong> is not verified yet.</p>")
            }
            (None, None) => format!("<p>We sent a confirmation link to <strong>{email}</strong>.</p>"),
        };

        Ok(RenderableState::Ready(page(
            &self.platform_name,
            "Verify your email",
            &status_line,
        )))
    }
}

/// HTML shells for the flow's entry-point pages.
#[derive(Clone, Debug)]
pub struct HtmlAuthForms {
    platform_name: String,
}

impl HtmlAuthForms {
    /// Build the forms from platform settings.
    pub fn new(platform: &settings::Platform) -> Self {
        Self {
            platform_name: platform.name.clone(),
        }
    }
}

impl AuthForms for HtmlAuthForms {
    fn sign_up_page(&self) -> String {
        page(
            &self.platform_name,
            "Create your account",
            &format!(
                "<form method=\"post\" action=\"/api/v0/auth/signup\">\
                 <input name=\"email\" type=\"email\" autocomplete=\"email\">\
                 <button type=\"submit\">Sign up</button>\
                 </form>\
                 <p><a href=\"{}\">Already have an account? Log in</a></p>",
                Stage::Login.path()
            ),
        )
    }

    fn login_page(&self) -> String {
        page(
            &self.platform_name,
            "Log in",
            &format!(
                "<form method=\"post\" action=\"/api/v0/auth/login\">\
                 <input name=\"email\" type=\"email\" autocomplete=\"email\">\
                 <input name=\"password\" type=\"password\" autocomplete=\"current-password\">\
                 <button type=\"submit\">Log in</button>\
                 </form>\
                 <p><a href=\"{}\">Forgot your password?</a></p>",
                Stage::ForgotPassword.path()
            ),
        )
    }

    fn forgot_password_page(&self) -> String {
        page(
            &self.platform_name,
            "Reset your password",
            "<form method=\"post\" action=\"/api/v0/auth/forgot-password\">\
             <input name=\"email\" type=\"email\" autocomplete=\"email\">\
             <button type=\"submit\">Send reset link</button>\
             </form>",
        )
    }

    fn reset_password_page(&self, token: Option<&str>) -> String {
        let token_field = token
            .map(|token| {
                format!(
                    "<input type=\"hidden\" name=\"token\" value=\"{}\">",
                    escape_html(token)
                )
            })
            .unwrap_or_default();

        page(
            &self.platform_name,
            "Choose a new password",
            &format!(
                "<form method=\"post\" action=\"/api/v0/auth/reset-password\">\
                 {token_field}\
                 <input name=\"password\" type=\"password\" autocomplete=\"new-password\">\
                 <button type=\"submit\">Save password</button>\
                 </form>"
            ),
        )
    }
}

fn page(platform: &str, title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>{title} · {platform}</title></head>\
         <body><main><h1>{title}</h1>{body}</main></body>\
         </html>"
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
