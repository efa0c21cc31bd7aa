//! Handler for the create-mapping endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{error, info, warn};
use validator::Validate;

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::api::middleware::request_id::RequestId;
use crate::error::{AppError, StoreError};
use crate::state::AppState;
use crate::utils::alias_generator::generate_alias;

/// Stores a URL under a caller-supplied or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "my-alias" }
/// ```
///
/// `alias` is optional; when it is absent or empty a random alias of the
/// configured length is generated. A generated alias that collides with an
/// existing one is not retried: the request fails like any other save error.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "my-alias" }
/// ```
///
/// # Errors
///
/// - 400 `failed to decode request body` if the body is not valid JSON
/// - 400 with a per-field message if validation fails
/// - 500 `failed to add url` for any storage failure, including a taken alias
#[tracing::instrument(name = "handlers.url.save", skip_all, fields(request_id = %request_id))]
pub async fn save_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        error!(error = %e, "failed to decode request body");
        AppError::bad_request("failed to decode request body")
    })?;

    info!(?request, "request body decoded");

    request.validate().inspect_err(|e| {
        error!(error = %e, "invalid request");
    })?;

    let url = request
        .url
        .ok_or_else(|| AppError::validation("field url is a required field"))?;

    let alias = match request.alias {
        Some(alias) if !alias.is_empty() => alias,
        _ => generate_alias(state.alias_length),
    };

    let id = state
        .url_saver
        .save_url(&url, &alias)
        .await
        .map_err(|err| {
            match &err {
                StoreError::AliasExists => warn!(alias = %alias, "url already exists"),
                _ => error!(error = %err, "failed to add url"),
            }
            AppError::internal("failed to add url")
        })?;

    info!(id, alias = %alias, "url added");

    Ok(Json(SaveResponse::ok(alias)))
}
