//! # usersvc-api
//!
//! HTTP API layer for usersvc built on Axum.
//!
//! Provides the auth endpoints, the bearer-token extractor, the
//! permission-check middleware for protected routers, DTOs, and error
//! mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
