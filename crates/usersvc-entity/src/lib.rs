//! # usersvc-entity
//!
//! Domain entity models for usersvc. Database entities derive
//! `sqlx::FromRow`; the session record is the value stored in the
//! credential store.

pub mod permission;
pub mod role;
pub mod session;
pub mod user;
