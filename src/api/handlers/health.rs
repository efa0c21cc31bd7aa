//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;

    let all_healthy = storage_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks storage connectivity with a trivial query.
async fn check_storage(state: &AppState) -> CheckStatus {
    match state.storage_probe.ping().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "storage health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some("storage unavailable".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::auth::BasicCredentials;
    use crate::domain::repositories::{MockStorageProbe, MockUrlGetter, MockUrlSaver};
    use crate::error::StoreError;
    use std::sync::Arc;

    fn state_with_probe(probe: MockStorageProbe) -> AppState {
        AppState {
            url_saver: Arc::new(MockUrlSaver::new()),
            url_getter: Arc::new(MockUrlGetter::new()),
            storage_probe: Arc::new(probe),
            credentials: Arc::new(BasicCredentials::new("user", "pass")),
            alias_length: 6,
        }
    }

    #[tokio::test]
    async fn test_health_degraded_when_storage_fails() {
        let mut probe = MockStorageProbe::new();
        probe.expect_ping().returning(|| {
            Err(StoreError::unavailable(
                "storage.sqlite.ping",
                sqlx::Error::PoolClosed,
            ))
        });

        let (status, Json(body)) = health_handler(State(state_with_probe(probe)))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.storage.status, "error");
    }
}
