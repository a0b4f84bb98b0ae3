//! Fixtures shared by the unit tests of this crate.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use usersvc_cache::CacheManager;
use usersvc_cache::memory::MemoryCacheProvider;
use usersvc_core::config::{Argon2Config, AuthConfig};
use usersvc_entity::permission::Permission;
use usersvc_entity::role::Role;
use usersvc_entity::user::User;

use crate::directory::{Directory, InMemoryDirectory};
use crate::password::PasswordHasher;
use crate::services::AuthServices;

pub(crate) const PASSWORD: &str = "s3cret-passphrase";

/// Auth configuration with cheap Argon2 costs.
pub(crate) fn auth_config() -> AuthConfig {
    AuthConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        password_secret: "test-pepper".to_string(),
        access_token_ttl_seconds: 60,
        refresh_token_ttl_seconds: 600,
        jwt_leeway_seconds: 0,
        argon2: Argon2Config {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
    }
}

pub(crate) fn memory_cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::from_provider(
        Arc::new(MemoryCacheProvider::default()),
        Duration::from_secs(1),
    ))
}

/// User `u1` holding role `Admin`, which grants `Delete-User`.
pub(crate) struct Fixture {
    pub directory: InMemoryDirectory,
    pub services: AuthServices,
    pub user: User,
    pub admin: Role,
    pub delete_user: Permission,
}

impl Fixture {
    pub(crate) async fn new() -> Self {
        Self::with_cache(memory_cache()).await
    }

    pub(crate) async fn with_cache(cache: Arc<CacheManager>) -> Self {
        let config = auth_config();
        let hasher = PasswordHasher::from_config(&config).unwrap();
        let directory = InMemoryDirectory::new();

        let user = new_user(&hasher, "u1@example.com", PASSWORD);
        let admin = new_role("Admin");
        let delete_user = Permission::new(Uuid::new_v4(), "Delete-User");

        directory.insert_user(user.clone()).await;
        directory.insert_role(admin.clone()).await;
        directory.insert_permission(delete_user.clone()).await;
        directory.assign_role(user.id, admin.id).await.unwrap();
        directory
            .grant_permission(admin.id, delete_user.id)
            .await
            .unwrap();

        let services = AuthServices::new(
            &config,
            cache,
            Directory::from_shared(Arc::new(directory.clone())),
        )
        .unwrap();

        Self {
            directory,
            services,
            user,
            admin,
            delete_user,
        }
    }
}

pub(crate) fn new_user(hasher: &PasswordHasher, email: &str, password: &str) -> User {
    let hashed = hasher.hash_password(password).unwrap();
    User {
        id: Uuid::new_v4(),
        name: email.to_string(),
        email: email.to_string(),
        active: true,
        salt: hashed.salt,
        password: hashed.hash,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn new_role(name: &str) -> Role {
    Role {
        id: Uuid::new_v4(),
        name: name.to_string(),
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
