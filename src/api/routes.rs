//! API route configuration.

use crate::api::handlers::{redirect_handler, save_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Routes that create mappings, protected by HTTP Basic authentication.
///
/// # Endpoints
///
/// - `POST /url` - Store a URL under an alias
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/url", post(save_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}

/// Public routes.
///
/// # Endpoints
///
/// - `GET /redirect/{alias}` - Redirect to the stored URL
/// - `GET /redirect` - Same handler; answers `invalid request`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/redirect", get(redirect_handler))
        .route("/redirect/{alias}", get(redirect_handler))
}
