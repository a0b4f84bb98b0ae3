//! Role repository.

use sqlx::PgPool;
use uuid::Uuid;

use usersvc_core::error::{AppError, ErrorKind};
use usersvc_core::result::AppResult;

/// Repository for the `roles` table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Id of the role named `name`, creating it as active if absent.
    pub async fn ensure(&self, name: &str) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO roles (id, name, active)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to ensure role", e))
    }
}
