//! Custom Axum extractors.

pub mod auth;

pub use auth::{AuthSession, bearer_token};
