//! Wiring of the auth services from configuration, cache, and directory.

use std::sync::Arc;

use usersvc_cache::CacheManager;
use usersvc_core::config::AuthConfig;
use usersvc_core::error::AppError;

use crate::directory::Directory;
use crate::guard::{AccessGate, RequestAuthenticator};
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::rbac::PermissionEvaluator;
use crate::session::{SessionManager, SessionStore};

/// The exposed auth services, sharing one store and one set of keys.
#[derive(Debug, Clone)]
pub struct AuthServices {
    /// Login, refresh, logout.
    pub sessions: Arc<SessionManager>,
    /// Bearer token authentication.
    pub authenticator: Arc<RequestAuthenticator>,
    /// Authentication plus permission check.
    pub gate: Arc<AccessGate>,
}

impl AuthServices {
    /// Builds every service, validating the auth configuration once.
    pub fn new(
        config: &AuthConfig,
        cache: Arc<CacheManager>,
        directory: Directory,
    ) -> Result<Self, AppError> {
        let encoder = Arc::new(JwtEncoder::new(config)?);
        let decoder = Arc::new(JwtDecoder::new(config)?);
        let hasher = Arc::new(PasswordHasher::from_config(config)?);
        let store = Arc::new(SessionStore::new(cache));

        let sessions = Arc::new(SessionManager::new(
            encoder,
            decoder.clone(),
            store.clone(),
            hasher,
            directory.users,
            directory.role_assignments,
        ));
        let authenticator = Arc::new(RequestAuthenticator::new(decoder, store.clone()));
        let evaluator = PermissionEvaluator::new(store, directory.role_permissions);
        let gate = Arc::new(AccessGate::new(authenticator.clone(), evaluator));

        Ok(Self {
            sessions,
            authenticator,
            gate,
        })
    }
}
