//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::{error::AppError, state::AppState};

/// Username and password accepted by [`layer`].
///
/// Only SHA-256 digests are kept, and candidates are compared digest to
/// digest in constant time.
#[derive(Clone)]
pub struct BasicCredentials {
    user: [u8; 32],
    password: [u8; 32],
}

impl BasicCredentials {
    pub fn new(user: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            user: digest(user.as_ref()),
            password: digest(password.as_ref()),
        }
    }

    fn matches(&self, user: &str, password: Option<&str>) -> bool {
        let Some(password) = password else {
            return false;
        };

        let user_ok = constant_time_eq(&self.user, &digest(user));
        let password_ok = constant_time_eq(&self.password, &digest(password));

        user_ok & password_ok
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicCredentials(***)")
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compares every byte, no early exit.
fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Authenticates requests using the `Authorization: Basic` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(user:password)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header is
/// missing, malformed, or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            tracing::info!("authorization header is missing or invalid");
            AppError::unauthorized("unauthorized")
        })?;

    if !st.credentials.matches(&user, password.as_deref()) {
        tracing::warn!(user = %user, "invalid basic auth credentials");
        return Err(AppError::unauthorized("unauthorized"));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_match() {
        let creds = BasicCredentials::new("admin", "secret");

        assert!(creds.matches("admin", Some("secret")));
        assert!(!creds.matches("admin", Some("wrong")));
        assert!(!creds.matches("other", Some("secret")));
        assert!(!creds.matches("admin", None));
        assert!(!creds.matches("admin", Some("secret ")));
        assert!(!creds.matches("", Some("")));
    }

    #[test]
    fn test_constant_time_eq() {
        let a = digest("secret");

        assert!(constant_time_eq(&a, &digest("secret")));
        assert!(!constant_time_eq(&a, &digest("Secret")));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = BasicCredentials::new("admin", "secret");

        let debug = format!("{creds:?}");

        assert!(!debug.contains("secret"));
        assert!(!debug.contains("admin"));
    }
}
