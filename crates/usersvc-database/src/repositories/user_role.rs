//! User-role assignment repository.

use sqlx::PgPool;
use uuid::Uuid;

use usersvc_core::error::{AppError, ErrorKind};
use usersvc_core::result::AppResult;
use usersvc_entity::role::RoleRef;

/// Repository for the `user_role` association.
#[derive(Debug, Clone)]
pub struct UserRoleRepository {
    pool: PgPool,
}

impl UserRoleRepository {
    /// Create a new user-role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active roles assigned to a user, in assignment order.
    pub async fn find_roles_of_user(&self, user_id: Uuid) -> AppResult<Vec<RoleRef>> {
        sqlx::query_as::<_, RoleRef>(
            r#"
            SELECT r.id, r.name
            FROM user_role ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1 AND r.active
            ORDER BY ur.assigned_at, r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find roles of user", e)
        })
    }

    /// Assign a role to a user. Assigning twice is a no-op.
    pub async fn assign(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_role (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign role", e))?;
        Ok(())
    }
}
