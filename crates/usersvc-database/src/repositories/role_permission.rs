//! Role-permission grant repository.

use sqlx::PgPool;
use uuid::Uuid;

use usersvc_core::error::{AppError, ErrorKind};
use usersvc_core::result::AppResult;
use usersvc_entity::permission::Permission;

/// Repository for the `role_permission` association.
#[derive(Debug, Clone)]
pub struct RolePermissionRepository {
    pool: PgPool,
}

impl RolePermissionRepository {
    /// Create a new role-permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Permissions granted to a role, ordered by name.
    pub async fn find_permissions_of_role(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.id, p.name
            FROM role_permission rp
            JOIN permissions p ON p.id = rp.permission_id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find permissions of role", e)
        })
    }

    /// Grant a permission to a role. Granting twice is a no-op.
    pub async fn grant(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO role_permission (role_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant permission", e))?;
        Ok(())
    }
}
