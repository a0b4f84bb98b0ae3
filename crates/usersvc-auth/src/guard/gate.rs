//! The combined authentication and permission gate.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use usersvc_core::error::AppError;

use super::authenticator::RequestAuthenticator;
use crate::rbac::PermissionEvaluator;

/// The caller a protected request runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// The authenticated user.
    pub subject_id: Uuid,
    /// The access session the request was made with.
    pub session_id: Uuid,
}

/// Authenticates a bearer token, then checks a required permission.
#[derive(Debug, Clone)]
pub struct AccessGate {
    authenticator: Arc<RequestAuthenticator>,
    evaluator: PermissionEvaluator,
}

impl AccessGate {
    /// Creates a new gate.
    pub fn new(authenticator: Arc<RequestAuthenticator>, evaluator: PermissionEvaluator) -> Self {
        Self {
            authenticator,
            evaluator,
        }
    }

    /// `Unauthorized` for a bad token or dead session, `Forbidden` when no
    /// role grants `permission`.
    pub async fn authorize(
        &self,
        bearer_token: &str,
        permission: &str,
    ) -> Result<Principal, AppError> {
        let session = self.authenticator.authenticate(bearer_token).await?;
        let subject_id = self
            .evaluator
            .evaluate(session.session_id, permission)
            .await?;

        Ok(Principal {
            subject_id,
            session_id: session.session_id,
        })
    }
}
