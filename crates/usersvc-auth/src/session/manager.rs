//! Session lifecycle manager: login, refresh rotation and logout.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use usersvc_core::error::AppError;
use usersvc_entity::session::SessionRecord;

use crate::directory::{RoleAssignmentLookup, UserLookup};
use crate::error::surface;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Message for every credential failure, so callers cannot tell which check failed.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for refresh token validation.
    decoder: Arc<JwtDecoder>,
    /// Session records in the credential store.
    store: Arc<SessionStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// User lookup by email.
    users: Arc<dyn UserLookup>,
    /// Role assignment lookup.
    role_assignments: Arc<dyn RoleAssignmentLookup>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        store: Arc<SessionStore>,
        hasher: Arc<PasswordHasher>,
        users: Arc<dyn UserLookup>,
        role_assignments: Arc<dyn RoleAssignmentLookup>,
    ) -> Self {
        Self {
            encoder,
            decoder,
            store,
            hasher,
            users,
            role_assignments,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by email; absent or inactive is `Unauthorized`
    /// 2. Verify the password
    /// 3. Resolve the user's roles
    /// 4. Issue a token pair and persist both session records
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .by_email(email)
            .await
            .map_err(surface("Failed to look up user"))?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt for inactive user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let password_valid = self
            .hasher
            .check_password(password, &user.password, &user.salt)
            .map_err(surface("Failed to verify password"))?;

        if !password_valid {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let roles = self
            .role_assignments
            .roles_of(user.id)
            .await
            .map_err(surface("Failed to resolve roles"))?;

        let pair = self
            .issue_and_persist(&SessionRecord::new(user.id, roles))
            .await?;

        info!(
            user_id = %user.id,
            session_id = %pair.access_session_id,
            "Login successful"
        );
        Ok(pair)
    }

    /// Rotates a refresh token into a brand-new pair.
    ///
    /// 1. Verify the refresh token
    /// 2. Load its session record; absent is `Unauthorized`
    /// 3. Re-resolve the subject's roles, keeping `extra`
    /// 4. Issue and persist the new pair
    /// 5. Delete the old refresh record, then the old access record
    ///
    /// The old refresh record is deleted only after both new records are
    /// written. Two concurrent refreshes with the same token may both
    /// succeed; each leaves its own live pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let old_session_id = claims.session_id();

        let old = self
            .store
            .load(old_session_id)
            .await
            .map_err(surface("Failed to load session"))?
            .ok_or_else(|| AppError::unauthorized("Session has been revoked or has expired"))?;

        let roles = self
            .role_assignments
            .roles_of(old.subject_id)
            .await
            .map_err(surface("Failed to resolve roles"))?;

        let mut record = SessionRecord::new(old.subject_id, roles);
        record.extra = old.extra.clone();

        let pair = self.issue_and_persist(&record).await?;

        if let Err(e) = self.store.revoke(old_session_id).await {
            error!(
                user_id = %old.subject_id,
                session_id = %old_session_id,
                error = %e,
                "Failed to delete rotated refresh session, discarding new pair"
            );
            self.discard(&pair).await;
            return Err(AppError::internal("Failed to rotate session"));
        }

        if let Some(old_access) = old.paired_session_id {
            if let Err(e) = self.store.revoke(old_access).await {
                warn!(
                    session_id = %old_access,
                    error = %e,
                    "Failed to revoke access session of rotated pair"
                );
            }
        }

        info!(
            user_id = %old.subject_id,
            old_session_id = %old_session_id,
            session_id = %pair.access_session_id,
            "Token refreshed"
        );
        Ok(pair)
    }

    /// Deletes one session record. Idempotent.
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        self.store
            .revoke(session_id)
            .await
            .map_err(surface("Failed to revoke session"))?;
        info!(session_id = %session_id, "Session revoked");
        Ok(())
    }

    /// Deletes a session record and the other half of its pair. Idempotent.
    pub async fn logout_pair(&self, session_id: Uuid) -> Result<(), AppError> {
        let record = self
            .store
            .load(session_id)
            .await
            .map_err(surface("Failed to load session"))?;

        self.logout(session_id).await?;

        if let Some(paired) = record.and_then(|r| r.paired_session_id) {
            self.logout(paired).await?;
        }
        Ok(())
    }

    /// Returns the live record of a session.
    pub async fn describe(&self, session_id: Uuid) -> Result<SessionRecord, AppError> {
        self.store
            .load(session_id)
            .await
            .map_err(surface("Failed to load session"))?
            .ok_or_else(|| AppError::unauthorized("Session has been revoked or has expired"))
    }

    /// Issues a pair for `record` and writes both session records concurrently.
    ///
    /// If either write fails, whichever record landed is deleted and the
    /// whole issuance fails.
    async fn issue_and_persist(&self, record: &SessionRecord) -> Result<TokenPair, AppError> {
        let access = self
            .encoder
            .issue_access_token(record.subject_id, &record.roles)?;
        let refresh = self.encoder.issue_refresh_token(
            record.subject_id,
            &record.roles,
            access.issued_at,
        )?;

        let access_record = record.paired_with(refresh.session_id);
        let refresh_record = record.paired_with(access.session_id);

        let (access_write, refresh_write) = tokio::join!(
            self.store
                .save(access.session_id, &access_record, self.encoder.access_ttl()),
            self.store
                .save(refresh.session_id, &refresh_record, self.encoder.refresh_ttl()),
        );

        if access_write.is_err() || refresh_write.is_err() {
            for (session_id, outcome) in [
                (access.session_id, &access_write),
                (refresh.session_id, &refresh_write),
            ] {
                match outcome {
                    Err(e) => error!(
                        user_id = %record.subject_id,
                        session_id = %session_id,
                        error = %e,
                        "Failed to persist session"
                    ),
                    Ok(()) => {
                        if let Err(e) = self.store.revoke(session_id).await {
                            warn!(
                                session_id = %session_id,
                                error = %e,
                                "Failed to remove half-written session"
                            );
                        }
                    }
                }
            }
            return Err(AppError::internal("Failed to persist session"));
        }

        Ok(TokenPair::new(
            access,
            self.encoder.access_ttl(),
            refresh,
            self.encoder.refresh_ttl(),
        ))
    }

    /// Best-effort removal of both records of a pair that will not be returned.
    async fn discard(&self, pair: &TokenPair) {
        let (a, r) = tokio::join!(
            self.store.revoke(pair.access_session_id),
            self.store.revoke(pair.refresh_session_id),
        );
        if let Err(e) = a.and(r) {
            warn!(error = %e, "Failed to discard unreturned session pair");
        }
    }
}
