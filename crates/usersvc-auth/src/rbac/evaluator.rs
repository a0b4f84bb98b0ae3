//! Permission evaluation against the role-permission relation.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use usersvc_core::error::AppError;

use crate::directory::RolePermissionLookup;
use crate::error::surface;
use crate::session::SessionStore;

/// Decides whether a session's roles grant a named permission.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    /// Session records in the credential store.
    store: Arc<SessionStore>,
    /// Role-permission lookup.
    permissions: Arc<dyn RolePermissionLookup>,
}

impl PermissionEvaluator {
    /// Creates a new evaluator.
    pub fn new(store: Arc<SessionStore>, permissions: Arc<dyn RolePermissionLookup>) -> Self {
        Self { store, permissions }
    }

    /// Checks the session's roles, in record order, for `permission`.
    ///
    /// Stops at the first role that grants it and returns the session's
    /// subject. An absent session is `Unauthorized`; no granting role,
    /// including no roles at all, is `Forbidden`.
    pub async fn evaluate(&self, session_id: Uuid, permission: &str) -> Result<Uuid, AppError> {
        let record = self
            .store
            .load(session_id)
            .await
            .map_err(surface("Failed to load session"))?
            .ok_or_else(|| AppError::unauthorized("Session has been revoked or has expired"))?;

        for role in &record.roles {
            let granted = self
                .permissions
                .permissions_of(role.id)
                .await
                .map_err(surface("Failed to resolve role permissions"))?;

            if granted.iter().any(|p| p.name == permission) {
                debug!(
                    user_id = %record.subject_id,
                    session_id = %session_id,
                    role = %role.name,
                    permission,
                    "Permission granted"
                );
                return Ok(record.subject_id);
            }
        }

        debug!(
            user_id = %record.subject_id,
            session_id = %session_id,
            permission,
            "Permission denied"
        );
        Err(AppError::forbidden(format!(
            "Missing required permission '{permission}'"
        )))
    }
}
