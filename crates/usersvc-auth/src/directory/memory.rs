//! In-memory directory using a Tokio mutex for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use usersvc_core::error::AppError;
use usersvc_core::result::AppResult;
use usersvc_entity::permission::Permission;
use usersvc_entity::role::{Role, RoleRef};
use usersvc_entity::user::User;

use super::lookup::{RoleAssignmentLookup, RolePermissionLookup, UserLookup};
use super::writer::DirectoryWriter;

/// Internal state for the in-memory directory.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
    /// Role ids per user, in assignment order.
    user_roles: HashMap<Uuid, Vec<Uuid>>,
    /// Permission ids per role.
    role_permissions: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory user/role/permission directory.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    pub async fn insert_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Inserts or replaces a role.
    pub async fn insert_role(&self, role: Role) {
        self.state.lock().await.roles.insert(role.id, role);
    }

    /// Inserts or replaces a permission.
    pub async fn insert_permission(&self, permission: Permission) {
        self.state
            .lock()
            .await
            .permissions
            .insert(permission.id, permission);
    }

    /// Marks a user active or inactive.
    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
        user.active = active;
        Ok(())
    }

    /// Assigns a role to a user. Assigning twice is a no-op.
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        if !state.roles.contains_key(&role_id) {
            return Err(AppError::not_found(format!("Role {role_id} not found")));
        }
        let assigned = state.user_roles.entry(user_id).or_default();
        if !assigned.contains(&role_id) {
            assigned.push(role_id);
        }
        Ok(())
    }

    /// Grants a permission to a role. Granting twice is a no-op.
    pub async fn grant_permission(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if !state.roles.contains_key(&role_id) {
            return Err(AppError::not_found(format!("Role {role_id} not found")));
        }
        if !state.permissions.contains_key(&permission_id) {
            return Err(AppError::not_found(format!(
                "Permission {permission_id} not found"
            )));
        }
        let granted = state.role_permissions.entry(role_id).or_default();
        if !granted.contains(&permission_id) {
            granted.push(permission_id);
        }
        debug!(role_id = %role_id, permission_id = %permission_id, "Permission granted");
        Ok(())
    }

    /// Removes a permission from a role.
    pub async fn revoke_permission(&self, role_id: Uuid, permission_id: Uuid) {
        let mut state = self.state.lock().await;
        if let Some(granted) = state.role_permissions.get_mut(&role_id) {
            granted.retain(|id| *id != permission_id);
        }
    }
}

#[async_trait]
impl UserLookup for InMemoryDirectory {
    async fn by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl RoleAssignmentLookup for InMemoryDirectory {
    async fn roles_of(&self, subject_id: Uuid) -> AppResult<Vec<RoleRef>> {
        let state = self.state.lock().await;
        let Some(assigned) = state.user_roles.get(&subject_id) else {
            return Ok(Vec::new());
        };
        Ok(assigned
            .iter()
            .filter_map(|id| state.roles.get(id))
            .filter(|role| role.active)
            .map(RoleRef::from)
            .collect())
    }
}

#[async_trait]
impl RolePermissionLookup for InMemoryDirectory {
    async fn permissions_of(&self, role_id: Uuid) -> AppResult<Vec<Permission>> {
        let state = self.state.lock().await;
        let mut permissions: Vec<Permission> = state
            .role_permissions
            .get(&role_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.permissions.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(permissions)
    }
}

#[async_trait]
impl DirectoryWriter for InMemoryDirectory {
    async fn ensure_role(&self, name: &str) -> AppResult<Uuid> {
        let mut state = self.state.lock().await;
        if let Some(role) = state.roles.values().find(|r| r.name == name) {
            return Ok(role.id);
        }
        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        };
        let id = role.id;
        state.roles.insert(id, role);
        Ok(id)
    }

    async fn ensure_permission(&self, name: &str) -> AppResult<Uuid> {
        let mut state = self.state.lock().await;
        if let Some(permission) = state.permissions.values().find(|p| p.name == name) {
            return Ok(permission.id);
        }
        let permission = Permission::new(Uuid::new_v4(), name);
        let id = permission.id;
        state.permissions.insert(id, permission);
        Ok(id)
    }

    async fn grant(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        self.grant_permission(role_id, permission_id).await
    }

    async fn create_user(&self, user: &User) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Ok(false);
        }
        state.users.insert(user.id, user.clone());
        Ok(true)
    }

    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        self.assign_role(user_id, role_id).await
    }
}
