//! Permission repository.

use sqlx::PgPool;
use uuid::Uuid;

use usersvc_core::error::{AppError, ErrorKind};
use usersvc_core::result::AppResult;

/// Repository for the `permissions` table.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Id of the permission named `name`, creating it if absent.
    pub async fn ensure(&self, name: &str) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO permissions (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to ensure permission", e))
    }
}
