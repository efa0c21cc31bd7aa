//! Error types for the storage layer and the HTTP surface.
//!
//! [`StoreError`] carries operation context for operator logs. [`AppError`]
//! is what clients see: a status code plus a short, non-leaking message
//! rendered as `{"status":"Error","error":"..."}`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::api::dto::response::ApiResponse;

/// Errors returned by URL store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The alias uniqueness constraint rejected the insert.
    #[error("url with this alias already exists")]
    AliasExists,

    /// No mapping matches the requested alias.
    #[error("url not found")]
    NotFound,

    /// Any other persistence failure (connection, schema, I/O).
    #[error("{op}: {source}")]
    Unavailable {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: not implemented")]
    Unimplemented { op: &'static str },
}

impl StoreError {
    pub fn unavailable(op: &'static str, source: sqlx::Error) -> Self {
        Self::Unavailable { op, source }
    }
}

/// Client-facing error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    RequestTimeout { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self::RequestTimeout {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let unauthorized = matches!(self, AppError::Unauthorized { .. });

        let mut response = (status, Json(ApiResponse::error(self.to_string()))).into_response();

        if unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="url-shortener""#),
            );
        }

        response
    }
}

/// Builds a readable per-field message such as `field url is not a valid URL`.
///
/// Messages are sorted so the output does not depend on map iteration order.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errs) => errs
                    .iter()
                    .map(|e| match e.code.as_ref() {
                        "required" => format!("field {field} is a required field"),
                        "url" => format!("field {field} is not a valid URL"),
                        _ => format!("field {field} is not valid"),
                    })
                    .collect::<Vec<_>>(),
                _ => vec![format!("field {field} is not valid")],
            })
            .collect();

        messages.sort();

        AppError::validation(messages.join(", "))
    }
}
