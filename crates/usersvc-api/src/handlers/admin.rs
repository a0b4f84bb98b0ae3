//! Admin session handlers.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use tracing::info;
use uuid::Uuid;

use usersvc_auth::guard::Principal;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub use usersvc_auth::directory::seed::REVOKE_SESSION;

/// DELETE /api/v1/admin/sessions/{session_id}
///
/// Revokes the named session and its paired session.
pub async fn revoke_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.logout_pair(session_id).await?;

    info!(
        admin_id = %principal.subject_id,
        session_id = %session_id,
        "Admin revoked session"
    );

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Session revoked".to_string(),
    })))
}
