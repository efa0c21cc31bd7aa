//! Helper functions used across the application.
//!
//! - [`alias_generator`] - Random alias generation
//! - [`db_error`] - Classification of SQLite errors

pub mod alias_generator;
pub mod db_error;
