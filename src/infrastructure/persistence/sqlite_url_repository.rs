//! SQLite implementation of the URL store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{StorageProbe, UrlDeleter, UrlGetter, UrlSaver};
use crate::error::StoreError;
use crate::utils::db_error::is_unique_violation_on_alias;

/// SQLite repository for alias → URL mappings.
///
/// Alias uniqueness is enforced by the table's `UNIQUE` constraint, so
/// concurrent inserts of the same alias are serialized by the engine: one
/// wins, the others get [`StoreError::AliasExists`].
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Creates the `url` table and its alias index if they do not exist.
    ///
    /// Safe to run on every process start.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        const OP: &str = "storage.sqlite.ensure_schema";

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url (
                id INTEGER PRIMARY KEY,
                alias TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| StoreError::unavailable(OP, e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_alias ON url(alias)")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::unavailable(OP, e))?;

        Ok(())
    }

    /// Loads the full mapping row for an alias.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no row matches.
    pub async fn find_by_alias(&self, alias: &str) -> Result<UrlMapping, StoreError> {
        const OP: &str = "storage.sqlite.find_by_alias";

        sqlx::query_as::<_, UrlMapping>("SELECT id, alias, url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::unavailable(OP, e))?
            .ok_or(StoreError::NotFound)
    }

    /// Counts rows with the given alias.
    pub async fn count_by_alias(&self, alias: &str) -> Result<i64, StoreError> {
        const OP: &str = "storage.sqlite.count_by_alias";

        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::unavailable(OP, e))
    }
}

#[async_trait]
impl UrlSaver for SqliteUrlRepository {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StoreError> {
        const OP: &str = "storage.sqlite.save_url";

        let result = sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
            .bind(url)
            .bind(alias)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_alias(&e) {
                    StoreError::AliasExists
                } else {
                    StoreError::unavailable(OP, e)
                }
            })?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl UrlGetter for SqliteUrlRepository {
    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        const OP: &str = "storage.sqlite.get_url";

        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::unavailable(OP, e))?
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl UrlDeleter for SqliteUrlRepository {
    async fn delete_url(&self, _alias: &str) -> Result<(), StoreError> {
        Err(StoreError::Unimplemented {
            op: "storage.sqlite.delete_url",
        })
    }
}

#[async_trait]
impl StorageProbe for SqliteUrlRepository {
    async fn ping(&self) -> Result<(), StoreError> {
        const OP: &str = "storage.sqlite.ping";

        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::unavailable(OP, e))?;

        Ok(())
    }
}
