//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::api::middleware::request_id::RequestId;
use crate::error::{AppError, StoreError};
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /redirect/{alias}`
///
/// Responds with `302 Found`, which browsers do not cache, so later changes
/// to the store are always observed.
///
/// # Errors
///
/// - 400 `invalid request` if the alias is missing or blank
/// - 404 `url not found` if no mapping has this alias
/// - 500 `failed to get url` on storage failures
#[tracing::instrument(name = "handlers.url.redirect", skip_all, fields(request_id = %request_id))]
pub async fn redirect_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    alias: Option<Path<String>>,
) -> Result<Response, AppError> {
    let alias = alias.map(|Path(alias)| alias).unwrap_or_default();

    if alias.trim().is_empty() {
        info!("alias is empty");
        return Err(AppError::bad_request("invalid request"));
    }

    let target = match state.url_getter.get_url(&alias).await {
        Ok(url) => url,
        Err(StoreError::NotFound) => {
            info!(alias = %alias, "url not found");
            return Err(AppError::not_found("url not found"));
        }
        Err(err) => {
            error!(error = %err, alias = %alias, "failed to get url");
            return Err(AppError::internal("failed to get url"));
        }
    };

    let location = HeaderValue::try_from(target.as_str()).map_err(|e| {
        error!(error = %e, url = %target, "stored url is not a valid header value");
        AppError::internal("failed to get url")
    })?;

    info!(url = %target, "got url");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
