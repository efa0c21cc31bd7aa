#![allow(dead_code)]

use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use std::sync::Arc;
use std::time::Duration;
use tower_http::normalize_path::NormalizePath;
use url_shortener::api::middleware::auth::BasicCredentials;
use url_shortener::domain::repositories::UrlSaver;
use url_shortener::infrastructure::persistence::{SqliteUrlRepository, connect_in_memory};
use url_shortener::routes::app_service;
use url_shortener::state::AppState;

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";
pub const TEST_ALIAS_LENGTH: usize = 6;

/// `Authorization` header value for [`TEST_USER`] / [`TEST_PASSWORD`].
pub const TEST_AUTH_HEADER: &str = "Basic YWRtaW46c2VjcmV0";

pub async fn create_test_repository() -> Arc<SqliteUrlRepository> {
    let pool = connect_in_memory().await.unwrap();
    let repo = SqliteUrlRepository::new(Arc::new(pool));
    repo.ensure_schema().await.unwrap();
    Arc::new(repo)
}

pub async fn create_test_link(repo: &SqliteUrlRepository, alias: &str, url: &str) -> i64 {
    repo.save_url(url, alias).await.unwrap()
}

pub fn create_test_state(repo: Arc<SqliteUrlRepository>) -> AppState {
    AppState::new(
        repo,
        BasicCredentials::new(TEST_USER, TEST_PASSWORD),
        TEST_ALIAS_LENGTH,
    )
}

pub fn create_test_app(repo: Arc<SqliteUrlRepository>) -> IntoMakeService<NormalizePath<Router>> {
    create_app_with(create_test_state(repo), Duration::from_secs(5))
}

/// Full application, path normalization included, over an arbitrary state.
pub fn create_app_with(
    state: AppState,
    request_timeout: Duration,
) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_service(state, request_timeout))
}
