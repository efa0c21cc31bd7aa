//! Core domain entities.
//!
//! The service persists a single entity, [`UrlMapping`].

pub mod url_mapping;

pub use url_mapping::UrlMapping;
