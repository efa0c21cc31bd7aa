//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The URL mapping entity and storage traits
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool and store
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `POST /url` - Store a URL under an alias (HTTP Basic auth)
//! - `GET /redirect/{alias}` - `302 Found` to the stored URL
//! - `GET /health` - Storage health check
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_PATH="./storage/storage.db"
//! export HTTP_SERVER_USER="admin"
//! export HTTP_SERVER_PASSWORD="secret"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::{StorageProbe, UrlDeleter, UrlGetter, UrlSaver};
    pub use crate::error::{AppError, StoreError};
    pub use crate::infrastructure::persistence::SqliteUrlRepository;
    pub use crate::state::AppState;
}
