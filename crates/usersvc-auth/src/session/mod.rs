//! Session lifecycle management: login, refresh rotation, and logout.

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::SessionStore;
