//! Directory lookups backed by the Postgres repositories.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use usersvc_core::result::AppResult;
use usersvc_database::DatabasePool;
use usersvc_database::repositories::{
    PermissionRepository, RolePermissionRepository, RoleRepository, UserRepository,
    UserRoleRepository,
};
use usersvc_entity::permission::Permission;
use usersvc_entity::role::RoleRef;
use usersvc_entity::user::User;

use super::Directory;
use super::lookup::{RoleAssignmentLookup, RolePermissionLookup, UserLookup};
use super::writer::DirectoryWriter;

#[async_trait]
impl UserLookup for UserRepository {
    async fn by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_by_email(email).await
    }
}

#[async_trait]
impl RoleAssignmentLookup for UserRoleRepository {
    async fn roles_of(&self, subject_id: Uuid) -> AppResult<Vec<RoleRef>> {
        self.find_roles_of_user(subject_id).await
    }
}

#[async_trait]
impl RolePermissionLookup for RolePermissionRepository {
    async fn permissions_of(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        self.find_permissions_of_role(role_id).await
    }
}

impl Directory {
    /// Builds the directory on top of a database pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            role_assignments: Arc::new(UserRoleRepository::new(pool.clone())),
            role_permissions: Arc::new(RolePermissionRepository::new(pool)),
        }
    }
}

/// Seeding writes against the Postgres tables.
#[derive(Debug, Clone)]
pub struct PostgresDirectoryWriter {
    users: UserRepository,
    roles: RoleRepository,
    permissions: PermissionRepository,
    user_roles: UserRoleRepository,
    role_permissions: RolePermissionRepository,
}

impl PostgresDirectoryWriter {
    /// Builds the writer on top of a database pool.
    pub fn new(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: UserRepository::new(pool.clone()),
            roles: RoleRepository::new(pool.clone()),
            permissions: PermissionRepository::new(pool.clone()),
            user_roles: UserRoleRepository::new(pool.clone()),
            role_permissions: RolePermissionRepository::new(pool),
        }
    }
}

#[async_trait]
impl UserLookup for PostgresDirectoryWriter {
    async fn by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }
}

#[async_trait]
impl DirectoryWriter for PostgresDirectoryWriter {
    async fn ensure_role(&self, name: &str) -> AppResult<Uuid> {
        self.roles.ensure(name).await
    }

    async fn ensure_permission(&self, name: &str) -> AppResult<Uuid> {
        self.permissions.ensure(name).await
    }

    async fn grant(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        self.role_permissions.grant(role_id, permission_id).await
    }

    async fn create_user(&self, user: &User) -> AppResult<bool> {
        self.users.create(user).await
    }

    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        self.user_roles.assign(user_id, role_id).await
    }
}
