//! DTOs for the create-mapping endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::response::ApiResponse;

/// Longest alias a caller may choose; matches the `ALIAS_LENGTH` ceiling.
pub const MAX_ALIAS_LENGTH: u64 = 64;

/// Characters that survive as a single `/redirect/{alias}` path segment.
/// Empty is allowed and means "generate one".
pub static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").unwrap());

/// Request to store a URL under an alias.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The URL to shorten. Required and must parse as an absolute URL.
    #[validate(required, url)]
    pub url: Option<String>,

    /// Optional caller-chosen alias. Empty or absent means "generate one".
    #[serde(default)]
    #[validate(length(max = MAX_ALIAS_LENGTH))]
    #[validate(regex(path = "*ALIAS_REGEX"))]
    pub alias: Option<String>,
}

/// Successful save: `{"status":"OK","alias":"..."}`.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub response: ApiResponse,
    pub alias: String,
}

impl SaveResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            response: ApiResponse::ok(),
            alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let request: SaveRequest =
            serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();

        assert!(request.validate().is_ok());
        assert!(request.alias.is_none());
    }

    #[test]
    fn test_missing_url_fails_required() {
        let request: SaveRequest = serde_json::from_value(json!({ "alias": "abc" })).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_invalid_url_fails() {
        let request: SaveRequest = serde_json::from_value(json!({ "url": "not-a-url" })).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_alias_rules() {
        let valid = |alias: &str| {
            SaveRequest {
                url: Some("https://example.com".to_string()),
                alias: Some(alias.to_string()),
            }
            .validate()
            .is_ok()
        };

        assert!(valid(""));
        assert!(valid("docs"));
        assert!(valid("Ab3_x-9"));
        assert!(valid(&"a".repeat(64)));

        assert!(!valid("a/b"));
        assert!(!valid("   "));
        assert!(!valid(" docs"));
        assert!(!valid("a?b"));
        assert!(!valid(&"a".repeat(65)));
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(SaveResponse::ok("abc123".to_string())).unwrap();

        assert_eq!(value, json!({ "status": "OK", "alias": "abc123" }));
    }
}
