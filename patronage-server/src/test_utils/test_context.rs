//! Helpers for running isolated webserver instances
use crate::{
    app_state::{AppState, AppStateBuilder},
    router::setup_app_router,
    settings::Platform,
    setups::test::{TestAuthForms, TestEmailVerificationWidget, TestOtpWidget, TestSetup},
};
use axum::{extract::connect_info::MockConnectInfo, Router};
use std::net::SocketAddr;

/// A reference to a running patronage server in an isolated test environment
#[derive(Debug)]
pub(crate) struct TestContext {
    app: Router,
    app_state: AppState<TestSetup>,
}

impl TestContext {
    /// Create a new test context
    pub(crate) fn new() -> Self {
        Self::new_with_state(|builder| builder)
    }

    pub(crate) fn new_with_state<F>(f: F) -> Self
    where
        F: FnOnce(AppStateBuilder<TestSetup>) -> AppStateBuilder<TestSetup>,
    {
        let builder = AppStateBuilder::default()
            .with_platform(Platform {
                name: "Patronage Test".to_string(),
                support_email: "support@patronage.test".to_string(),
            })
            .with_otp_widget(TestOtpWidget::default())
            .with_email_verification_widget(TestEmailVerificationWidget::default())
            .with_auth_forms(TestAuthForms::default());

        let app_state = f(builder).finalize().unwrap();

        let app = setup_app_router(app_state.clone())
            .layer(MockConnectInfo(SocketAddr::from(([0, 0, 0, 0], 3000))));

        Self { app, app_state }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn otp_widget(&self) -> &TestOtpWidget {
        &self.app_state.otp_widget
    }

    pub(crate) fn email_verification_widget(&self) -> &TestEmailVerificationWidget {
        &self.app_state.email_verification_widget
    }

    pub(crate) fn auth_forms(&self) -> &TestAuthForms {
        &self.app_state.auth_forms
    }
}
