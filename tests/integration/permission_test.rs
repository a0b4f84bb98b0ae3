//! Integration tests for permission-guarded routes.

mod helpers;

use axum::http::StatusCode;

use usersvc_auth::AdminAccount;

use helpers::{DELETE_USER, TestApp};

const PASSWORD: &str = "correct horse battery staple";

#[tokio::test]
async fn test_granted_permission_passes_with_principal() {
    let app = TestApp::new().await;
    let user_id = app.create_user("u1@example.com", PASSWORD).await;
    let admin = app.create_role("Admin").await;
    let delete_user = app.create_permission(DELETE_USER).await;
    app.assign(user_id, admin).await;
    app.grant(admin, delete_user).await;

    let (access, _) = app.login("u1@example.com", PASSWORD).await;
    let target = uuid::Uuid::new_v4();
    let response = app
        .request("DELETE", &format!("/api/v1/users/{target}"), None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["deleted"], target.to_string());
    assert_eq!(response.body["subject_id"], user_id.to_string());
}

#[tokio::test]
async fn test_missing_permission_is_forbidden() {
    let app = TestApp::new().await;
    let user_id = app.create_user("u2@example.com", PASSWORD).await;
    let viewer = app.create_role("Viewer").await;
    app.create_permission(DELETE_USER).await;
    app.assign(user_id, viewer).await;

    let (access, _) = app.login("u2@example.com", PASSWORD).await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{}", uuid::Uuid::new_v4()),
            None,
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{}", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_any_role_may_grant() {
    let app = TestApp::new().await;
    let user_id = app.create_user("u3@example.com", PASSWORD).await;
    let viewer = app.create_role("Viewer").await;
    let operator = app.create_role("Operator").await;
    let delete_user = app.create_permission(DELETE_USER).await;
    app.assign(user_id, viewer).await;
    app.assign(user_id, operator).await;
    app.grant(operator, delete_user).await;

    let (access, _) = app.login("u3@example.com", PASSWORD).await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{}", uuid::Uuid::new_v4()),
            None,
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_grant_changes_apply_to_live_sessions() {
    let app = TestApp::new().await;
    let user_id = app.create_user("u4@example.com", PASSWORD).await;
    let admin = app.create_role("Admin").await;
    let delete_user = app.create_permission(DELETE_USER).await;
    app.assign(user_id, admin).await;

    let (access, _) = app.login("u4@example.com", PASSWORD).await;
    let path = format!("/api/v1/users/{}", uuid::Uuid::new_v4());

    let before = app.request("DELETE", &path, None, Some(&access)).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    app.grant(admin, delete_user).await;
    let granted = app.request("DELETE", &path, None, Some(&access)).await;
    assert_eq!(granted.status, StatusCode::OK);

    app.directory.revoke_permission(admin, delete_user).await;
    let revoked = app.request("DELETE", &path, None, Some(&access)).await;
    assert_eq!(revoked.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_revokes_another_session() {
    let app = TestApp::new().await;
    let admin_id = app.create_user("admin@example.com", PASSWORD).await;
    let victim_id = app.create_user("victim@example.com", PASSWORD).await;
    let admin = app.create_role("Admin").await;
    let revoke = app.create_permission("Revoke-Session").await;
    app.assign(admin_id, admin).await;
    app.grant(admin, revoke).await;
    let member = app.create_role("Member").await;
    app.assign(victim_id, member).await;

    let (admin_access, _) = app.login("admin@example.com", PASSWORD).await;
    let (victim_access, _) = app.login("victim@example.com", PASSWORD).await;

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&victim_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    let victim_session = me.body["data"]["session_id"]
        .as_str()
        .expect("missing session_id")
        .to_string();

    let denied = app
        .request(
            "DELETE",
            &format!("/api/v1/admin/sessions/{victim_session}"),
            None,
            Some(&victim_access),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/v1/admin/sessions/{victim_session}"),
            None,
            Some(&admin_access),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let after = app
        .request("GET", "/api/v1/auth/me", None, Some(&victim_access))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logged_out_principal_cannot_authorize() {
    let app = TestApp::new().await;
    let user_id = app.create_user("u5@example.com", PASSWORD).await;
    let admin = app.create_role("Admin").await;
    let delete_user = app.create_permission(DELETE_USER).await;
    app.assign(user_id, admin).await;
    app.grant(admin, delete_user).await;

    let (access, _) = app.login("u5@example.com", PASSWORD).await;
    let logout = app
        .request("DELETE", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{}", uuid::Uuid::new_v4()),
            None,
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seeded_admin_revokes_a_member_session() {
    let app = TestApp::new().await;
    let report = app
        .seed(Some(AdminAccount {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: PASSWORD.to_string(),
        }))
        .await;
    assert!(report.admin.is_some());

    let member = app.create_user("member@example.com", PASSWORD).await;
    let role = app.create_role("Member").await;
    app.assign(member, role).await;

    let (admin_access, _) = app.login("root@example.com", PASSWORD).await;
    let (member_access, member_refresh) = app.login("member@example.com", PASSWORD).await;

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&member_access))
        .await;
    let member_session = me.body["data"]["session_id"]
        .as_str()
        .expect("missing session_id")
        .to_string();

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/v1/admin/sessions/{member_session}"),
            None,
            Some(&admin_access),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let refreshed = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(serde_json::json!({ "refresh_token": member_refresh })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}
