//! Capability traits for URL storage.
//!
//! Each handler depends only on the operation it needs, so the store is split
//! into narrow traits instead of one wide repository interface.

use async_trait::async_trait;

use crate::error::StoreError;

/// Persists new alias → URL mappings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSaver: Send + Sync {
    /// Inserts a mapping and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if the alias is already taken.
    /// Returns [`StoreError::Unavailable`] on any other storage failure.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StoreError>;
}

/// Resolves an alias to its target URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlGetter: Send + Sync {
    /// Looks up the target URL by exact alias match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping has this alias.
    /// Returns [`StoreError::Unavailable`] on query failures.
    async fn get_url(&self, alias: &str) -> Result<String, StoreError>;
}

/// Removes mappings by alias.
///
/// Part of the store contract, but no handler calls it yet; the SQLite
/// implementation answers with [`StoreError::Unimplemented`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlDeleter: Send + Sync {
    async fn delete_url(&self, alias: &str) -> Result<(), StoreError>;
}

/// Cheap reachability check used by the health endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
