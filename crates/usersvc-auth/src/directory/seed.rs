//! Default roles, permissions, and the first administrator.
//!
//! Seeding is idempotent: existing roles, permissions, grants, and users
//! are kept, and only what is missing is created.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use usersvc_core::error::AppError;
use usersvc_core::result::AppResult;
use usersvc_entity::user::User;

use super::writer::DirectoryWriter;
use crate::password::PasswordHasher;

/// Role given to the seeded administrator.
pub const ADMIN_ROLE: &str = "Admin";

/// Permission to revoke another user's session.
pub const REVOKE_SESSION: &str = "Revoke-Session";

/// Every permission the service knows about.
pub const PERMISSIONS: &[&str] = &[
    "List-User",
    "View-User",
    "Create-User",
    "Update-User",
    "Delete-User",
    "List-Role",
    "View-Role",
    "Create-Role",
    "Update-Role",
    "Delete-Role",
    "List-Permission",
    "View-Permission",
    "Create-Permission",
    "Update-Permission",
    "Delete-Permission",
    REVOKE_SESSION,
];

/// Default roles and the permissions each one grants.
pub const ROLE_GRANTS: &[(&str, &[&str])] = &[
    (ADMIN_ROLE, PERMISSIONS),
    (
        "Manager",
        &[
            "List-User",
            "View-User",
            "Create-User",
            "Update-User",
            "List-Role",
            "View-Role",
            "Create-Role",
            "Update-Role",
            "List-Permission",
            "View-Permission",
        ],
    ),
    (
        "User",
        &["List-User", "View-User", "Create-User", "Update-User"],
    ),
    ("Guest", &["View-User", "View-Role", "View-Permission"]),
];

/// The administrator account to create.
#[derive(Clone, Validate)]
pub struct AdminAccount {
    /// Display name.
    #[validate(length(min = 1, message = "Admin name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "A valid admin email is required"))]
    pub email: String,
    /// Plaintext password; hashed before it is stored.
    #[validate(length(min = 1, message = "Admin password is required"))]
    pub password: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// What happened to the administrator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    /// A new user was created.
    Created(Uuid),
    /// A user with the email already existed; its password was left alone.
    Existing(Uuid),
}

impl AdminOutcome {
    /// Id of the administrator user.
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Created(id) | Self::Existing(id) => *id,
        }
    }
}

/// Summary of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Roles ensured.
    pub roles: usize,
    /// Permissions ensured.
    pub permissions: usize,
    /// Role-permission grants ensured.
    pub grants: usize,
    /// Administrator outcome, if one was requested.
    pub admin: Option<AdminOutcome>,
}

/// Writes the default catalog and, optionally, an administrator.
#[derive(Debug, Clone)]
pub struct DirectorySeeder {
    writer: Arc<dyn DirectoryWriter>,
    hasher: PasswordHasher,
}

impl DirectorySeeder {
    /// Creates a seeder. `hasher` must carry the server's pepper.
    pub fn new(writer: Arc<dyn DirectoryWriter>, hasher: PasswordHasher) -> Self {
        Self { writer, hasher }
    }

    /// Ensures every default role, permission, and grant exists, then the
    /// administrator if one is given.
    ///
    /// An administrator whose email is already registered keeps its
    /// password and is only assigned the `Admin` role.
    pub async fn seed(&self, admin: Option<&AdminAccount>) -> AppResult<SeedReport> {
        if let Some(account) = admin {
            account
                .validate()
                .map_err(|e| AppError::validation(e.to_string()))?;
        }

        for name in PERMISSIONS {
            self.writer.ensure_permission(name).await?;
        }

        let mut grants = 0;
        for (role, granted) in ROLE_GRANTS {
            let role_id = self.writer.ensure_role(role).await?;
            for permission in *granted {
                let permission_id = self.writer.ensure_permission(permission).await?;
                self.writer.grant(role_id, permission_id).await?;
                grants += 1;
            }
        }

        let admin = match admin {
            Some(account) => Some(self.seed_admin(account).await?),
            None => None,
        };

        let report = SeedReport {
            roles: ROLE_GRANTS.len(),
            permissions: PERMISSIONS.len(),
            grants,
            admin,
        };
        info!(
            roles = report.roles,
            permissions = report.permissions,
            grants = report.grants,
            "Directory seeded"
        );
        Ok(report)
    }

    async fn seed_admin(&self, account: &AdminAccount) -> AppResult<AdminOutcome> {
        let admin_role = self.writer.ensure_role(ADMIN_ROLE).await?;

        if let Some(existing) = self.writer.by_email(&account.email).await? {
            self.writer.assign(existing.id, admin_role).await?;
            warn!(
                user_id = %existing.id,
                "Admin email already registered, keeping its password"
            );
            return Ok(AdminOutcome::Existing(existing.id));
        }

        let hashed = self.hasher.hash_password(&account.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: account.name.clone(),
            email: account.email.clone(),
            active: true,
            salt: hashed.salt,
            password: hashed.hash,
            created_at: now,
            updated_at: now,
        };

        if !self.writer.create_user(&user).await? {
            return Err(AppError::validation(format!(
                "Email '{}' was registered concurrently",
                account.email
            )));
        }
        self.writer.assign(user.id, admin_role).await?;

        info!(user_id = %user.id, "Admin user created");
        Ok(AdminOutcome::Created(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Directory, InMemoryDirectory, RolePermissionLookup, UserLookup};
    use crate::services::AuthServices;
    use crate::testing;
    use usersvc_core::error::ErrorKind;

    fn account(password: &str) -> AdminAccount {
        AdminAccount {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn seeder(dir: &InMemoryDirectory) -> DirectorySeeder {
        let hasher = PasswordHasher::from_config(&testing::auth_config()).unwrap();
        DirectorySeeder::new(Arc::new(dir.clone()), hasher)
    }

    fn services(dir: &InMemoryDirectory) -> AuthServices {
        AuthServices::new(
            &testing::auth_config(),
            testing::memory_cache(),
            Directory::from_shared(Arc::new(dir.clone())),
        )
        .unwrap()
    }

    #[test]
    fn test_every_granted_permission_is_in_the_catalog() {
        for (role, granted) in ROLE_GRANTS {
            for permission in *granted {
                assert!(PERMISSIONS.contains(permission), "{role} grants {permission}");
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_admin_can_log_in_and_revoke_sessions() {
        let dir = InMemoryDirectory::new();
        let report = seeder(&dir).seed(Some(&account("first-boot"))).await.unwrap();

        assert_eq!(report.roles, 4);
        assert_eq!(report.permissions, PERMISSIONS.len());
        assert_eq!(report.grants, PERMISSIONS.len() + 10 + 4 + 3);
        assert!(matches!(report.admin, Some(AdminOutcome::Created(_))));

        let services = services(&dir);
        let pair = services
            .sessions
            .authenticate("root@example.com", "first-boot")
            .await
            .unwrap();
        let principal = services
            .gate
            .authorize(&pair.access_token, REVOKE_SESSION)
            .await
            .unwrap();
        assert_eq!(Some(principal.subject_id), report.admin.map(|a| a.user_id()));
        assert!(
            services
                .gate
                .authorize(&pair.access_token, "Delete-User")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_seeding_twice_keeps_existing_data() {
        let dir = InMemoryDirectory::new();
        let first = seeder(&dir).seed(Some(&account("first-boot"))).await.unwrap();
        let second = seeder(&dir).seed(Some(&account("ignored"))).await.unwrap();

        let admin_id = first.admin.map(|a| a.user_id()).unwrap();
        assert_eq!(second.admin, Some(AdminOutcome::Existing(admin_id)));

        let admin_role = dir.ensure_role(ADMIN_ROLE).await.unwrap();
        assert_eq!(
            dir.permissions_of(admin_role).await.unwrap().len(),
            PERMISSIONS.len()
        );

        let services = services(&dir);
        assert!(
            services
                .sessions
                .authenticate("root@example.com", "first-boot")
                .await
                .is_ok()
        );
        let err = services
            .sessions
            .authenticate("root@example.com", "ignored")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_guest_role_is_read_only() {
        let dir = InMemoryDirectory::new();
        seeder(&dir).seed(None).await.unwrap();

        let hasher = PasswordHasher::from_config(&testing::auth_config()).unwrap();
        let guest = testing::new_user(&hasher, "guest@example.com", "pw");
        assert!(dir.create_user(&guest).await.unwrap());
        let guest_role = dir.ensure_role("Guest").await.unwrap();
        dir.assign(guest.id, guest_role).await.unwrap();

        let services = services(&dir);
        let pair = services
            .sessions
            .authenticate("guest@example.com", "pw")
            .await
            .unwrap();
        assert!(
            services
                .gate
                .authorize(&pair.access_token, "View-User")
                .await
                .is_ok()
        );
        let err = services
            .gate
            .authorize(&pair.access_token, "Delete-User")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_invalid_admin_rejected_before_writing() {
        let dir = InMemoryDirectory::new();
        let mut bad = account("pw");
        bad.email = "not-an-email".to_string();

        let err = seeder(&dir).seed(Some(&bad)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = seeder(&dir).seed(Some(&account(""))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(dir.by_email("root@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_existing_user_is_promoted() {
        let dir = InMemoryDirectory::new();
        let hasher = PasswordHasher::from_config(&testing::auth_config()).unwrap();
        let user = testing::new_user(&hasher, "root@example.com", "mine");
        dir.create_user(&user).await.unwrap();

        let report = seeder(&dir).seed(Some(&account("other"))).await.unwrap();
        assert_eq!(report.admin, Some(AdminOutcome::Existing(user.id)));

        let services = services(&dir);
        let pair = services
            .sessions
            .authenticate("root@example.com", "mine")
            .await
            .unwrap();
        assert!(
            services
                .gate
                .authorize(&pair.access_token, REVOKE_SESSION)
                .await
                .is_ok()
        );
    }
}
