//! Permission-check middleware for protected routers.
//!
//! ```ignore
//! Router::new()
//!     .route("/admin/sessions/{session_id}", delete(revoke_session))
//!     .route_layer(from_fn_with_state(
//!         RequiredPermission::new(&state, "Revoke-Session"),
//!         require_permission,
//!     ))
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::error::ApiError;
use crate::extractors::bearer_token;
use crate::state::AppState;

/// Middleware state: the app state plus the permission a route requires.
#[derive(Debug, Clone)]
pub struct RequiredPermission {
    state: AppState,
    permission: Arc<str>,
}

impl RequiredPermission {
    /// Requires `permission` on every route the layer wraps.
    pub fn new(state: &AppState, permission: &str) -> Self {
        Self {
            state: state.clone(),
            permission: Arc::from(permission),
        }
    }
}

/// Authorizes the bearer token for the required permission and puts the
/// resulting [`Principal`](usersvc_auth::guard::Principal) into the
/// request extensions.
pub async fn require_permission(
    State(required): State<RequiredPermission>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;
    let principal = required
        .state
        .gate
        .authorize(token, &required.permission)
        .await?;

    debug!(
        user_id = %principal.subject_id,
        session_id = %principal.session_id,
        permission = %required.permission,
        "Request authorized"
    );

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
