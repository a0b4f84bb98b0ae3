//! Directory writes used to seed roles, permissions, and accounts.

use async_trait::async_trait;
use uuid::Uuid;

use usersvc_core::result::AppResult;
use usersvc_entity::user::User;

use super::lookup::UserLookup;

/// Idempotent inserts into the directory.
///
/// Request handling never writes; only seeding does.
#[async_trait]
pub trait DirectoryWriter: UserLookup {
    /// Id of the role named `name`, creating it as active if absent.
    async fn ensure_role(&self, name: &str) -> AppResult<Uuid>;

    /// Id of the permission named `name`, creating it if absent.
    async fn ensure_permission(&self, name: &str) -> AppResult<Uuid>;

    /// Grants a permission to a role. Granting twice is a no-op.
    async fn grant(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()>;

    /// Inserts a user. Returns `false` when the email is already taken.
    async fn create_user(&self, user: &User) -> AppResult<bool>;

    /// Assigns a role to a user. Assigning twice is a no-op.
    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()>;
}
