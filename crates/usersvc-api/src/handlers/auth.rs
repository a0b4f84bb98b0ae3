//! Auth handlers: login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use usersvc_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, MeResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthSession;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tokens = state
        .session_manager
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tokens = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// DELETE /api/v1/auth/logout
///
/// Revokes the caller's access session and its paired refresh session.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.logout_pair(auth.session_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let record = state.session_manager.describe(auth.session_id).await?;

    Ok(Json(ApiResponse::ok(MeResponse {
        user_id: record.subject_id,
        session_id: auth.session_id,
        roles: record.roles,
        expires_at: auth.claims.expires_at(),
    })))
}
