//! Storage trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Traits
//!
//! - [`UrlSaver`] - create a mapping
//! - [`UrlGetter`] - resolve an alias
//! - [`UrlDeleter`] - delete by alias (stub)
//! - [`StorageProbe`] - health check
//!
//! # Testing
//!
//! See integration tests in `tests/repository_url.rs` for usage examples.

pub mod url_repository;

pub use url_repository::{StorageProbe, UrlDeleter, UrlGetter, UrlSaver};

#[cfg(test)]
pub use url_repository::{MockStorageProbe, MockUrlDeleter, MockUrlGetter, MockUrlSaver};
