//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /url`              - Create a mapping (Basic auth)
//! - `GET  /redirect/{alias}` - Redirect to the stored URL (public)
//! - `GET  /health`           - Storage health check (public)
//!
//! Anything else gets a JSON `404`.
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slashes trimmed before routing
//! - **Panic recovery** - A panicking request becomes a 500 JSON error
//! - **Request id** - `x-request-id` assigned and echoed on the response
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding the configured timeout get a 408 JSON error

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{panic, request_id, timeout, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::middleware::map_response;
use axum::routing::get;
use std::time::Duration;
use tower::{Layer, ServiceBuilder};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound on handling a single request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api::routes::protected_routes(state.clone()))
        .merge(api::routes::public_routes())
        .route("/health", get(health_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(panic::layer())
                .layer(request_id::set_layer())
                .layer(tracing::layer())
                .layer(request_id::propagate_layer())
                .layer(map_response(timeout::error_body))
                .layer(timeout::layer(request_timeout)),
        )
}

/// [`app_router`] behind trailing-slash normalization.
///
/// Normalization has to run before routing, so it wraps the router instead of
/// being one of its layers.
pub fn app_service(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state, request_timeout))
}

async fn not_found() -> AppError {
    AppError::not_found("not found")
}
