//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use usersvc_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/v1/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let cache_ok = state.cache.health_check().await.unwrap_or(false);
    let database = match &state.db {
        Some(db) => {
            if db.health_check().await.unwrap_or(false) {
                "connected"
            } else {
                "unreachable"
            }
        }
        None => "not_configured",
    };

    let healthy = cache_ok && database != "unreachable";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cache: if cache_ok { "connected" } else { "unreachable" }.to_string(),
            database: database.to_string(),
        })),
    )
}
