//! JWT token creation with separate access and refresh signing keys.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::debug;
use uuid::Uuid;

use usersvc_core::config::AuthConfig;
use usersvc_core::error::AppError;
use usersvc_entity::role::RoleRef;

use super::claims::{Claims, TokenType};

/// One signed token and the session id it is bound to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Fresh random session id, also the `sid` claim.
    pub session_id: Uuid,
    /// Compact signed JWT.
    pub token: String,
    /// The `iat` claim.
    pub issued_at: DateTime<Utc>,
    /// The `exp` claim.
    pub expires_at: DateTime<Utc>,
}

/// An access/refresh pair handed to the client.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Access token lifetime.
    pub access_ttl: Duration,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Refresh token lifetime.
    pub refresh_ttl: Duration,
    /// Shared issuance timestamp of the pair.
    pub issued_at: DateTime<Utc>,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
    /// Session id bound to the access token.
    pub access_session_id: Uuid,
    /// Session id bound to the refresh token.
    pub refresh_session_id: Uuid,
}

impl TokenPair {
    /// Assembles a pair from its two issued halves.
    pub fn new(
        access: IssuedToken,
        access_ttl: Duration,
        refresh: IssuedToken,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token: access.token,
            access_ttl,
            refresh_token: refresh.token,
            refresh_ttl,
            issued_at: access.issued_at,
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
            access_session_id: access.session_id,
            refresh_session_id: refresh.session_id,
        }
    }
}

/// Creates signed JWT access and refresh tokens.
///
/// The encoder never touches the credential store; persisting the
/// session records is the caller's job.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key for access tokens.
    access_key: EncodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails if the secrets are missing or equal, or the lifetimes are
    /// not ordered access < refresh.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        })
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues an access token bound to a fresh session id.
    pub fn issue_access_token(
        &self,
        subject_id: Uuid,
        roles: &[RoleRef],
    ) -> Result<IssuedToken, AppError> {
        self.issue(subject_id, roles, TokenType::Access, Utc::now())
    }

    /// Issues a refresh token bound to a fresh session id.
    ///
    /// `issued_at_of_pair` is the `iat` of the access token it pairs with.
    pub fn issue_refresh_token(
        &self,
        subject_id: Uuid,
        roles: &[RoleRef],
        issued_at_of_pair: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        self.issue(subject_id, roles, TokenType::Refresh, issued_at_of_pair)
    }

    fn issue(
        &self,
        subject_id: Uuid,
        roles: &[RoleRef],
        kind: TokenType,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let (key, ttl) = match kind {
            TokenType::Access => (&self.access_key, self.access_ttl),
            TokenType::Refresh => (&self.refresh_key, self.refresh_ttl),
        };
        let lifetime = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::internal(format!("Token lifetime out of range: {e}")))?;
        let expires_at = issued_at + lifetime;
        let session_id = Uuid::new_v4();

        let claims = Claims {
            sub: subject_id,
            sid: session_id,
            kind,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        debug!(
            user_id = %subject_id,
            session_id = %session_id,
            kind = %kind,
            roles = roles.len(),
            "Token issued"
        );

        Ok(IssuedToken {
            session_id,
            token,
            issued_at,
            expires_at,
        })
    }
}
