//! Axum middleware stack.

pub mod logging;
pub mod permission;

pub use permission::{RequiredPermission, require_permission};
