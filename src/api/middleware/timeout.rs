//! Request timeout.
//!
//! [`layer`] cuts a request off once the configured duration elapses and
//! answers `408` with an empty body. [`error_body`] sits outside it and fills
//! that response in with the usual JSON error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

use crate::error::AppError;

pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Replaces the bare `408` produced by [`layer`] with
/// `{"status":"Error","error":"request timeout"}`.
pub async fn error_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("request timed out");

    AppError::request_timeout("request timeout").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .body(Body::from("kept"))
            .unwrap();

        let response = error_body(response).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"kept");
    }

    #[tokio::test]
    async fn test_timeout_gets_json_envelope() {
        let response = Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();

        let response = error_body(response).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "request timeout");
    }
}
