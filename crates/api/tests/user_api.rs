//! HTTP-level integration tests for profiles and avatars.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, get, get_auth, token_for, TINY_PNG};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_own_profile(pool: PgPool) {
    let user = common::create_user(&pool, "selfie").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["username"], "selfie");
    assert_eq!(json["email"], "selfie@test.com");
    assert!(json.get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_fields(pool: PgPool) {
    let user = common::create_user(&pool, "editable").await;

    let app = common::build_test_app(pool.clone());
    let response = common::put_json_auth(
        app,
        "/api/v1/users/me",
        &token_for(&user),
        serde_json::json!({ "about": "Collector of long-running seinen." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["about"], "Collector of long-running seinen.");
    // Username untouched.
    assert_eq!(json["username"], "editable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_to_taken_username_returns_409(pool: PgPool) {
    common::create_user(&pool, "occupied").await;
    let user = common::create_user(&pool, "mover").await;

    let app = common::build_test_app(pool);
    let response = common::put_json_auth(
        app,
        "/api/v1/users/me",
        &token_for(&user),
        serde_json::json!({ "username": "occupied" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_password_change_takes_effect(pool: PgPool) {
    let user = common::create_user(&pool, "rekey").await;

    let app = common::build_test_app(pool.clone());
    let response = common::put_json_auth(
        app,
        "/api/v1/users/me",
        &token_for(&user),
        serde_json::json!({ "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works, new one does.
    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "rekey@test.com", "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "rekey@test.com", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_profile_lookup(pool: PgPool) {
    common::create_user(&pool, "lookmeup").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/users/lookmeup").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/nobody-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_avatar_upload_and_fetch(pool: PgPool) {
    let user = common::create_user(&pool, "pictured").await;
    let boundary = "X-MANGALIB-TEST-BOUNDARY";
    let body = common::multipart_body(boundary, &[], Some(("file", "me.png", TINY_PNG)));

    let app = common::build_test_app(pool.clone());
    let request = Request::builder()
        .method("PUT")
        .uri("/api/v1/users/me/avatar")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(&user)))
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["profile_image"].as_str().unwrap().ends_with(".png"));

    // The raw bytes come back with an image content type.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/pictured/avatar").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_avatar_missing_returns_404(pool: PgPool) {
    common::create_user(&pool, "faceless").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/faceless/avatar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
