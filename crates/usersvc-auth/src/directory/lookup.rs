//! Directory lookup traits.

use async_trait::async_trait;
use uuid::Uuid;

use usersvc_core::result::AppResult;
use usersvc_entity::permission::Permission;
use usersvc_entity::role::RoleRef;
use usersvc_entity::user::User;

/// Finds users by login email.
#[async_trait]
pub trait UserLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `None` when no user has this email.
    async fn by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Resolves the roles assigned to a subject.
#[async_trait]
pub trait RoleAssignmentLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Active roles of the subject, in a stable order.
    async fn roles_of(&self, subject_id: Uuid) -> AppResult<Vec<RoleRef>>;
}

/// Resolves the permissions granted to a role.
#[async_trait]
pub trait RolePermissionLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Permissions granted to the role. Unknown roles have none.
    async fn permissions_of(&self, role_id: Uuid) -> AppResult<Vec<Permission>>;
}
