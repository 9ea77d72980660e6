//! Routes for [axum::Router].

pub mod fallback;
pub mod flow;
pub mod health;
pub mod ping;
