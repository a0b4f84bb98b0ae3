//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use usersvc_auth::guard::{AccessGate, RequestAuthenticator};
use usersvc_auth::services::AuthServices;
use usersvc_auth::session::SessionManager;
use usersvc_cache::CacheManager;
use usersvc_core::config::AppConfig;
use usersvc_database::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential store (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// PostgreSQL pool; absent when the directory is in-memory
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, refresh, logout
    pub session_manager: Arc<SessionManager>,
    /// Bearer token authentication
    pub authenticator: Arc<RequestAuthenticator>,
    /// Authentication plus permission check
    pub gate: Arc<AccessGate>,
}

impl AppState {
    /// Assembles the state from already-built services.
    pub fn new(
        config: AppConfig,
        cache: Arc<CacheManager>,
        db: Option<DatabasePool>,
        auth: AuthServices,
    ) -> Self {
        Self {
            config: Arc::new(config),
            cache,
            db,
            session_manager: auth.sessions,
            authenticator: auth.authenticator,
            gate: auth.gate,
        }
    }
}
