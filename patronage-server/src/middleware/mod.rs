//! Middleware for the application.

pub mod logging;
pub mod request_ulid;
pub mod runtime;
