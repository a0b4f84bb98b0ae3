//! # usersvc-database
//!
//! PostgreSQL connection management and the read-only repositories that
//! back user, role, and permission lookups.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
