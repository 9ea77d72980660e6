//! Request data types that are common between clients of and the patronage auth-flow server

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// The navigational state threaded between verification stages.
///
/// A context is deserialized from the query string of every stage request and
/// discarded once the stage has rendered or redirected. It is never stored
/// beyond the request it arrived with.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerificationContext {
    /// The email address being verified or authenticated
    pub email: Option<String>,
    /// Outcome flag surfaced after email verification, informational only
    pub verified: Option<bool>,
    /// Opaque error message for the email-verification stage to display
    pub error: Option<String>,
}

impl VerificationContext {
    /// A context carrying only an email address.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}
