//! Bearer token authentication.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use usersvc_core::error::AppError;

use crate::error::surface;
use crate::jwt::{Claims, JwtDecoder};
use crate::session::SessionStore;

/// A caller whose access token verified and whose session is live.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Session id from the token.
    pub session_id: Uuid,
    /// Verified claims.
    pub claims: Claims,
}

/// Verifies access tokens and checks that their session still exists.
///
/// Signature validity alone cannot express server-side revocation, so
/// every call consults the credential store.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    /// Access token verification.
    decoder: Arc<JwtDecoder>,
    /// Session records in the credential store.
    store: Arc<SessionStore>,
}

impl RequestAuthenticator {
    /// Creates a new authenticator.
    pub fn new(decoder: Arc<JwtDecoder>, store: Arc<SessionStore>) -> Self {
        Self { decoder, store }
    }

    /// Authenticates a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedSession, AppError> {
        let claims = self.decoder.decode_access_token(token)?;
        let session_id = claims.session_id();

        let live = self
            .store
            .exists(session_id)
            .await
            .map_err(surface("Failed to check session"))?;

        if !live {
            debug!(session_id = %session_id, "Rejected token for revoked session");
            return Err(AppError::unauthorized("Session has been revoked or has expired"));
        }

        Ok(AuthenticatedSession { session_id, claims })
    }
}
