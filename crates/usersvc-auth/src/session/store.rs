//! Session records in the credential store.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use usersvc_cache::{CacheManager, keys};
use usersvc_core::error::AppError;
use usersvc_core::traits::cache::CacheProvider;
use usersvc_entity::session::SessionRecord;

/// Reads and writes [`SessionRecord`]s keyed by session id.
///
/// There is no local caching: every call goes to the store, which is the
/// only authority on whether a session is live.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Credential store.
    cache: Arc<CacheManager>,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Writes a record that expires after `ttl`.
    pub async fn save(
        &self,
        session_id: Uuid,
        record: &SessionRecord,
        ttl: Duration,
    ) -> Result<(), AppError> {
        self.cache
            .set_json(&keys::session(session_id), record, ttl)
            .await
    }

    /// Loads a record; `None` once revoked, rotated, or expired.
    pub async fn load(&self, session_id: Uuid) -> Result<Option<SessionRecord>, AppError> {
        self.cache.get_json(&keys::session(session_id)).await
    }

    /// Whether a live record exists.
    pub async fn exists(&self, session_id: Uuid) -> Result<bool, AppError> {
        self.cache.exists(&keys::session(session_id)).await
    }

    /// Deletes a record. Revoking an absent session is not an error.
    pub async fn revoke(&self, session_id: Uuid) -> Result<(), AppError> {
        self.cache.delete(&keys::session(session_id)).await
    }
}
