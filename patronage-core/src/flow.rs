//! The stage state machine of the identity-verification flow.
//!
//! Each stage corresponds to a distinct screen. Guards are evaluated here as
//! plain data, so the HTTP layer only has to map a [`GuardDecision`] onto a
//! render or a redirect and stays trivially thin.

use crate::common::VerificationContext;

/// Fallback display value when no address reached the email-verification stage.
pub const EMAIL_PLACEHOLDER: &str = "your email";

/// One step of the authentication/verification flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Account-creation entry point. Originates the email the OTP stage needs.
    SignUp,
    /// Returning-user entry point.
    Login,
    /// One-time-code entry. Requires a known email address.
    OtpVerification,
    /// Confirmation screen reached from an out-of-band email link.
    EmailVerification,
    /// Password-recovery request entry point.
    ForgotPassword,
    /// Password-recovery completion. The reset token is owned by the form.
    ResetPassword,
}

impl Stage {
    /// Canonical route path of the stage.
    pub fn path(&self) -> &'static str {
        match self {
            Stage::SignUp => "/signup",
            Stage::Login => "/login",
            Stage::OtpVerification => "/verify-otp",
            Stage::EmailVerification => "/verify-email",
            Stage::ForgotPassword => "/forgot-password",
            Stage::ResetPassword => "/reset-password",
        }
    }
}

/// Outcome of evaluating a stage guard against a [`VerificationContext`].
///
/// A failed precondition is not an error surface. The visitor is steered back
/// to the stage that produces the missing parameter, so the forced transition
/// is an explicit variant rather than an early return buried in a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision<T> {
    /// The precondition holds; render the stage with the typed parameters.
    Proceed(T),
    /// The precondition failed; redirect the visitor to the given stage.
    Redirect(Stage),
}

/// Parameters the guard forwards to the OTP-entry widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpStageParams {
    /// The address the one-time code was sent to. Guaranteed non-empty.
    pub email: String,
}

impl OtpStageParams {
    /// Evaluate the OTP-stage guard.
    ///
    /// A visitor may not reach this stage without a non-empty `email`;
    /// sign-up is the canonical recovery point. No syntax validation happens
    /// here: a malformed non-empty address is forwarded verbatim and rejected
    /// by the backend that consumes the submission.
    pub fn from_context(context: VerificationContext) -> GuardDecision<Self> {
        match context.email {
            Some(email) if !email.is_empty() => GuardDecision::Proceed(Self { email }),
            _ => GuardDecision::Redirect(Stage::SignUp),
        }
    }
}

/// Parameters the guard forwards to the email-verification widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailVerificationParams {
    /// The address under verification, or [`EMAIL_PLACEHOLDER`] when the
    /// link that led here did not carry one.
    pub email: String,
    /// Pass-through verification outcome, interpreted by the widget.
    pub verified: Option<bool>,
    /// Pass-through error message, interpreted by the widget.
    pub error: Option<String>,
}

impl EmailVerificationParams {
    /// Build the stage parameters. Never fails: this stage is reachable from
    /// an out-of-band email link that may or may not carry the address, so
    /// absence falls back to the display placeholder.
    pub fn from_context(context: VerificationContext) -> Self {
        Self {
            email: context
                .email
                .filter(|email| !email.is_empty())
                .unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
            verified: context.verified,
            error: context.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn context(email: Option<&str>) -> VerificationContext {
        VerificationContext {
            email: email.map(String::from),
            ..VerificationContext::default()
        }
    }

    #[test]
    fn test_otp_guard_redirects_without_email() {
        let decision = OtpStageParams::from_context(context(None));
        assert_matches!(decision, GuardDecision::Redirect(Stage::SignUp));
    }

    #[test]
    fn test_otp_guard_redirects_on_empty_email() {
        let decision = OtpStageParams::from_context(context(Some("")));
        assert_matches!(decision, GuardDecision::Redirect(Stage::SignUp));
    }

    #[test]
    fn test_otp_guard_forwards_email_verbatim() {
        let decision =
            OtpStageParams::from_context(VerificationContext::with_email("alex@example.com"));
        assert_eq!(
            decision,
            GuardDecision::Proceed(OtpStageParams {
                email: "alex@example.com".to_string()
            })
        );
    }

    #[test]
    fn test_otp_guard_performs_no_syntax_validation() {
        // Not a valid address, but present and non-empty. The backend owns
        // format validation.
        let decision = OtpStageParams::from_context(context(Some("not-an-email")));
        assert_eq!(
            decision,
            GuardDecision::Proceed(OtpStageParams {
                email: "not-an-email".to_string()
            })
        );
    }

    #[test]
    fn test_email_verification_uses_placeholder_when_absent() {
        let params = EmailVerificationParams::from_context(context(None));
        assert_eq!(params.email, "your email");
    }

    #[test]
    fn test_email_verification_passes_flags_through_unchanged() {
        let params = EmailVerificationParams::from_context(VerificationContext {
            email: Some("alex@example.com".to_string()),
            verified: Some(false),
            error: Some("token-expired".to_string()),
        });

        assert_eq!(params.email, "alex@example.com");
        assert_eq!(params.verified, Some(false));
        assert_eq!(params.error.as_deref(), Some("token-expired"));
    }

    #[test]
    fn test_email_verification_preserves_absence() {
        let params = EmailVerificationParams::from_context(context(Some("alex@example.com")));
        assert_eq!(params.verified, None);
        assert_eq!(params.error, None);
    }

    #[test]
    fn test_stage_paths() {
        assert_eq!(Stage::SignUp.path(), "/signup");
        assert_eq!(Stage::Login.path(), "/login");
        assert_eq!(Stage::OtpVerification.path(), "/verify-otp");
        assert_eq!(Stage::EmailVerification.path(), "/verify-email");
        assert_eq!(Stage::ForgotPassword.path(), "/forgot-password");
        assert_eq!(Stage::ResetPassword.path(), "/reset-password");
    }
}
