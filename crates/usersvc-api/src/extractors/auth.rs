//! `AuthSession` extractor pulls the bearer token from the Authorization
//! header and runs the request authenticator.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use usersvc_auth::guard::AuthenticatedSession;
use usersvc_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated session available in handlers.
#[derive(Debug, Clone)]
pub struct AuthSession(pub AuthenticatedSession);

impl std::ops::Deref for AuthSession {
    type Target = AuthenticatedSession;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Returns the raw token of a `Bearer` Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let session = state.authenticator.authenticate(token).await?;
        Ok(AuthSession(session))
    }
}
