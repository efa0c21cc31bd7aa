//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::auth::BasicCredentials;
use crate::domain::repositories::{StorageProbe, UrlGetter, UrlSaver};
use crate::infrastructure::persistence::SqliteUrlRepository;

/// Immutable per-process state. Cloned per request; all fields are cheap
/// handles.
#[derive(Clone)]
pub struct AppState {
    pub url_saver: Arc<dyn UrlSaver>,
    pub url_getter: Arc<dyn UrlGetter>,
    pub storage_probe: Arc<dyn StorageProbe>,
    pub credentials: Arc<BasicCredentials>,
    /// Length of aliases generated when the caller does not supply one.
    pub alias_length: usize,
}

impl AppState {
    /// Wires every storage capability to the same SQLite repository.
    pub fn new(
        repository: Arc<SqliteUrlRepository>,
        credentials: BasicCredentials,
        alias_length: usize,
    ) -> Self {
        Self {
            url_saver: repository.clone(),
            url_getter: repository.clone(),
            storage_probe: repository,
            credentials: Arc::new(credentials),
            alias_length,
        }
    }
}
