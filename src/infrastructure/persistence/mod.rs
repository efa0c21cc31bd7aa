//! SQLite persistence.
//!
//! - [`pool`] - Connection pool setup (file-backed or in-memory)
//! - [`SqliteUrlRepository`] - URL store implementing the domain storage traits

pub mod pool;
pub mod sqlite_url_repository;

pub use pool::{PoolSettings, connect, connect_in_memory};
pub use sqlite_url_repository::SqliteUrlRepository;
