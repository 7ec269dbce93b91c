//! Integration tests for registration, login, and the auth gate.

mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_tokens_and_user() {
    let app = TestApp::new();
    let body = app.register("ada@example.com").await;

    let data = &body["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["user"]["email"], "ada@example.com");
    assert_eq!(data["user"]["role"], "user");
    assert_eq!(data["user"]["email_verified"], false);
    // Credential material must never appear in the response.
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("ada@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ADA@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_email_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["fields"]["email"], "Invalid email address",
        "unexpected body: {:?}",
        response.body
    );
}

#[tokio::test]
async fn test_register_guessable_password_rejected() {
    let app = TestApp::new();

    // Long enough, but trivially guessable.
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("ada@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "ada@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["user"]["last_login_at"].is_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("ada@example.com").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "ada@example.com",
                "password": "Wrong-Password-1",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // Same status and same body, so the two cases cannot be told apart.
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_profile_authenticated() {
    let app = TestApp::new();
    app.register("ada@example.com").await;
    let (access, _) = app.login("ada@example.com", PASSWORD).await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_profile_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Access token is required");
}

#[tokio::test]
async fn test_profile_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/profile", None, Some("not-a-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let app = TestApp::new();
    let body = app.register("ada@example.com").await;
    let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();

    // Token with valid structure but signed under the wrong key.
    let now = chrono::Utc::now().timestamp();
    let claims = serde_json::json!({
        "sub": user_id,
        "email": "ada@example.com",
        "role": "admin",
        "iat": now,
        "exp": now + 3600,
    });
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"attacker-secret"),
    )
    .unwrap();

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&forged))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_rejected_as_access_token() {
    let app = TestApp::new();
    app.register("ada@example.com").await;
    let (_, refresh) = app.login("ada@example.com", PASSWORD).await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&refresh))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_lookup_is_admin_only() {
    use foliogate_database::store::IdentityStore;
    use foliogate_entity::user::UserRole;

    let app = TestApp::new();
    app.register("root@example.com").await;
    app.register("member@example.com").await;
    let (admin_access, _) = app.login("root@example.com", PASSWORD).await;
    let (member_access, _) = app.login("member@example.com", PASSWORD).await;

    let member = app
        .store
        .find_by_email("member@example.com")
        .await
        .unwrap()
        .unwrap();
    let path = format!("/api/users/{}", member.id);

    // Unauthenticated callers never reach the role check.
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Regular accounts are refused.
    let response = app.request("GET", &path, None, Some(&member_access)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Insufficient permissions");

    // The gate reads the role from the store, not from the token, so
    // promoting the account takes effect on the next request.
    let admin = app
        .store
        .find_by_email("root@example.com")
        .await
        .unwrap()
        .unwrap();
    app.store.set_role(admin.id, UserRole::Admin).await.unwrap();

    let response = app.request("GET", &path, None, Some(&admin_access)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "member@example.com");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
