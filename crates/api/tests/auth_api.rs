//! HTTP-level integration tests for registration, login, token refresh,
//! verification, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

/// Log in a seeded user via the API and return the token response.
async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_201_with_public_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "newreader",
            "email": "newreader@test.com",
            "password": "a-strong-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newreader");
    assert_eq!(json["email"], "newreader@test.com");
    assert_eq!(json["is_admin"], false);
    assert!(json["id"].is_number());
    assert!(
        json.get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username_returns_409(pool: PgPool) {
    common::create_user(&pool, "taken").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        serde_json::json!({
            "username": "taken",
            "email": "other@test.com",
            "password": "a-strong-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_bad_input(pool: PgPool) {
    let cases = [
        serde_json::json!({ "username": "x y", "email": "a@b.com", "password": "long-enough-pw" }),
        serde_json::json!({ "username": "ok", "email": "not-an-email", "password": "long-enough-pw" }),
        serde_json::json!({ "username": "ok", "email": "a@b.com", "password": "short" }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/v1/auth/register", body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload should be rejected: {body}"
        );
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = common::create_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "loginuser@test.com", TEST_PASSWORD).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["role"], "user");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    common::create_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ghost@test.com", "password": "whatever-pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_login_carries_admin_role(pool: PgPool) {
    common::create_admin(&pool, "siteadmin").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "siteadmin@test.com", TEST_PASSWORD).await;
    assert_eq!(json["user"]["role"], "admin");
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_tokens(pool: PgPool) {
    common::create_user(&pool, "rotator").await;
    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "rotator@test.com", TEST_PASSWORD).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and returns a different refresh token.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["refresh_token"], refresh_token);

    // The used token is revoked; replaying it fails.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_valid_token(pool: PgPool) {
    let user = common::create_user(&pool, "verifier").await;
    let token = common::token_for(&user);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/verify",
        serde_json::json!({ "token": token }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["user_id"], user.id);
    assert_eq!(json["role"], "user");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/verify",
        serde_json::json!({ "token": "not.a.jwt" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_user(&pool, "leaver").await;
    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "leaver@test.com", TEST_PASSWORD).await;
    let access = login["access_token"].as_str().unwrap().to_string();
    let refresh = login["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/auth/logout", &access, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token no longer works.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_route_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", "bogus-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
