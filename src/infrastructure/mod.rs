//! Infrastructure layer for external integrations.
//!
//! Implements the storage traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementation

pub mod persistence;
