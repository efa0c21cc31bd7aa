//! Domain layer containing the business entity and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage capability traits
//!
//! The domain layer has no dependency on the HTTP surface. Storage traits are
//! implemented by the infrastructure layer.

pub mod entities;
pub mod repositories;
