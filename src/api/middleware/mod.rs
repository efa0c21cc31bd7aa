//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, request ids, panic recovery, timeouts and observability
//! middleware.

pub mod auth;
pub mod panic;
pub mod request_id;
pub mod timeout;
pub mod tracing;
