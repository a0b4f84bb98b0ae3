//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::delete;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use usersvc_api::middleware::{RequiredPermission, require_permission};
use usersvc_api::{AppState, build_router};
use usersvc_auth::guard::Principal;
use usersvc_auth::{
    AdminAccount, AuthServices, Directory, DirectorySeeder, InMemoryDirectory, PasswordHasher,
    SeedReport,
};
use usersvc_cache::CacheManager;
use usersvc_cache::memory::MemoryCacheProvider;
use usersvc_core::config::{
    AppConfig, Argon2Config, AuthConfig, CacheConfig, DatabaseConfig, LoggingConfig,
    ServerConfig,
};
use usersvc_entity::permission::Permission;
use usersvc_entity::role::Role;
use usersvc_entity::user::User;

/// Permission guarding the test-only delete-user route.
pub const DELETE_USER: &str = "Delete-User";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory the services read users and grants from
    pub directory: InMemoryDirectory,
    /// Hasher matching the app's pepper and cost
    pub hasher: PasswordHasher,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = test_config();
        let cache = Arc::new(CacheManager::from_provider(
            Arc::new(MemoryCacheProvider::default()),
            Duration::from_secs(1),
        ));
        let directory = InMemoryDirectory::new();
        let auth = AuthServices::new(
            &config.auth,
            Arc::clone(&cache),
            Directory::from_shared(Arc::new(directory.clone())),
        )
        .expect("Failed to build auth services");
        let hasher = PasswordHasher::from_config(&config.auth).expect("Failed to build hasher");

        let state = AppState::new(config, cache, None, auth);
        let router = build_router(state.clone()).merge(protected_routes(&state));

        Self {
            router,
            directory,
            hasher,
        }
    }

    /// Create an active user with the given password
    pub async fn create_user(&self, email: &str, password: &str) -> Uuid {
        let hashed = self
            .hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let user = User {
            id: Uuid::new_v4(),
            name: email.to_string(),
            email: email.to_string(),
            active: true,
            salt: hashed.salt,
            password: hashed.hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = user.id;
        self.directory.insert_user(user).await;
        id
    }

    /// Create an active role
    pub async fn create_role(&self, name: &str) -> Uuid {
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = role.id;
        self.directory.insert_role(role).await;
        id
    }

    /// Create a permission
    pub async fn create_permission(&self, name: &str) -> Uuid {
        let permission = Permission::new(Uuid::new_v4(), name);
        let id = permission.id;
        self.directory.insert_permission(permission).await;
        id
    }

    /// Assign a role to a user
    pub async fn assign(&self, user_id: Uuid, role_id: Uuid) {
        self.directory
            .assign_role(user_id, role_id)
            .await
            .expect("Failed to assign role");
    }

    /// Grant a permission to a role
    pub async fn grant(&self, role_id: Uuid, permission_id: Uuid) {
        self.directory
            .grant_permission(role_id, permission_id)
            .await
            .expect("Failed to grant permission");
    }

    /// Seed the default roles and permissions, plus an admin if given
    pub async fn seed(&self, admin: Option<AdminAccount>) -> SeedReport {
        DirectorySeeder::new(Arc::new(self.directory.clone()), self.hasher.clone())
            .seed(admin.as_ref())
            .await
            .expect("Failed to seed directory")
    }

    /// Login and return (access_token, refresh_token)
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        (
            response.body["data"]["access_token"]
                .as_str()
                .expect("missing access_token")
                .to_string(),
            response.body["data"]["refresh_token"]
                .as_str()
                .expect("missing refresh_token")
                .to_string(),
        )
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` if not JSON)
    pub body: Value,
}

/// A business route guarded by `Delete-User`, echoing the principal.
fn protected_routes(state: &AppState) -> Router {
    Router::new()
        .route("/api/v1/users/{user_id}", delete(delete_user))
        .route_layer(from_fn_with_state(
            RequiredPermission::new(state, DELETE_USER),
            require_permission,
        ))
}

async fn delete_user(
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> Json<Value> {
    Json(serde_json::json!({
        "deleted": user_id,
        "subject_id": principal.subject_id,
        "session_id": principal.session_id,
    }))
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused@localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            statement_timeout_ms: 1000,
        },
        cache: CacheConfig {
            provider: "memory".to_string(),
            ..CacheConfig::default()
        },
        auth: AuthConfig {
            access_secret: "integration-access".to_string(),
            refresh_secret: "integration-refresh".to_string(),
            password_secret: "integration-pepper".to_string(),
            access_token_ttl_seconds: 300,
            refresh_token_ttl_seconds: 3600,
            jwt_leeway_seconds: 0,
            argon2: Argon2Config {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        },
        logging: LoggingConfig::default(),
    }
}
