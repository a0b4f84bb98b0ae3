//! Integration tests for login, refresh, logout, and the caller's session.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

const EMAIL: &str = "u1@example.com";
const PASSWORD: &str = "correct horse battery staple";

async fn app_with_user() -> (TestApp, uuid::Uuid) {
    let app = TestApp::new().await;
    let user_id = app.create_user(EMAIL, PASSWORD).await;
    let admin = app.create_role("Admin").await;
    app.assign(user_id, admin).await;
    (app, user_id)
}

#[tokio::test]
async fn test_login_success() {
    let (app, _) = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": EMAIL, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_ne!(data["access_token"], data["refresh_token"]);
    assert_eq!(data["token_type"], "Bearer");
    assert_eq!(data["access_expires_in"], 300);
    assert_eq!(data["refresh_expires_in"], 3600);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (app, _) = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "U1@Example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, user_id) = app_with_user().await;

    let wrong_password = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": EMAIL, "password": "wrong" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    app.directory
        .set_user_active(user_id, false)
        .await
        .expect("Failed to deactivate user");
    let inactive = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": EMAIL, "password": PASSWORD })),
            None,
        )
        .await;

    for response in [&wrong_password, &unknown_user, &inactive] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body, inactive.body);
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let (app, _) = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "not-an-email", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_returns_session() {
    let (app, user_id) = app_with_user().await;
    let (access, _) = app.login(EMAIL, PASSWORD).await;

    let response = app.request("GET", "/api/v1/auth/me", None, Some(&access)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["user_id"], user_id.to_string());
    assert_eq!(data["roles"][0]["name"], "Admin");
    assert!(data["expires_at"].is_string());
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let (app, _) = app_with_user().await;

    let missing = app.request("GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/v1/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let (app, _) = app_with_user().await;
    let (access, refresh) = app.login(EMAIL, PASSWORD).await;

    let as_bearer = app
        .request("GET", "/api/v1/auth/me", None, Some(&refresh))
        .await;
    assert_eq!(as_bearer.status, StatusCode::UNAUTHORIZED);

    let as_refresh = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": access })),
            None,
        )
        .await;
    assert_eq!(as_refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_is_single_use() {
    let (app, _) = app_with_user().await;
    let (old_access, refresh) = app.login(EMAIL, PASSWORD).await;

    let first = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let new_access = first.body["data"]["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string();
    assert_ne!(new_access, old_access);

    let reused = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);

    let stale = app
        .request("GET", "/api/v1/auth/me", None, Some(&old_access))
        .await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_both_tokens() {
    let (app, _) = app_with_user().await;
    let (access, refresh) = app.login(EMAIL, PASSWORD).await;

    let logout = app
        .request("DELETE", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/v1/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let refreshed = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);

    let again = app
        .request("DELETE", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_leaves_other_sessions_alone() {
    let (app, _) = app_with_user().await;
    let (first, _) = app.login(EMAIL, PASSWORD).await;
    let (second, _) = app.login(EMAIL, PASSWORD).await;

    let logout = app
        .request("DELETE", "/api/v1/auth/logout", None, Some(&first))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/v1/auth/me", None, Some(&second)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["cache"], "connected");
    assert_eq!(response.body["data"]["database"], "not_configured");
}
