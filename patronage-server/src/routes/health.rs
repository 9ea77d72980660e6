//! Healthcheck route.

use crate::error::AppResult;
use axum::{self, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// A healthcheck response containing diagnostic information for the service
#[derive(ToSchema, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct HealthcheckResponse {
    /// Whether the stage router is wired up and serving
    ready: bool,
}

impl HealthcheckResponse {
    /// Whether the service is healthy
    pub fn is_healthy(&self) -> bool {
        self.ready
    }

    /// The status code for the healthcheck response
    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET handler for checking service health.
///
/// The flow guard holds no connections and no state, so reaching this
/// handler at all means the service is able to serve stages.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "patronage-server healthy", body=HealthcheckResponse),
        (status = 503, description = "patronage-server not healthy", body=HealthcheckResponse)
    )
)]
pub async fn healthcheck() -> AppResult<(StatusCode, axum::Json<serde_json::Value>)> {
    let response = HealthcheckResponse { ready: true };

    Ok((response.status_code(), axum::Json(json! { response })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{route_builder::RouteBuilder, test_context::TestContext};
    use assert_json_diff::assert_json_eq;
    use http::Method;

    #[tokio::test]
    async fn test_healthcheck_reports_healthy() {
        let ctx = TestContext::new();

        let (status, body): (_, serde_json::Value) =
            RouteBuilder::new(ctx.app(), Method::GET, "/healthcheck")
                .into_json_response()
                .await
                .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_json_eq!(body, json!({ "ready": true }));
    }

    #[test]
    fn test_unready_response_maps_to_service_unavailable() {
        let response = HealthcheckResponse { ready: false };

        assert!(!response.is_healthy());
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
