//! Core traits defined in `usersvc-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
