//! Per-request gates: bearer authentication and permission checks.

pub mod authenticator;
pub mod gate;

pub use authenticator::{AuthenticatedSession, RequestAuthenticator};
pub use gate::{AccessGate, Principal};
