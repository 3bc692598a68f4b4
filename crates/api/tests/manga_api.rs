//! HTTP-level integration tests for manga CRUD and moderation visibility.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

fn create_payload(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "author": "Kentaro Miura",
        "artist": "Kentaro Miura",
        "description": "Dark fantasy.",
        "release_date": "1989-08-25",
        "status": "paused",
        "categories": ["Action", "Fantasy"],
    })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_manga_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/manga", create_payload("Berserk")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_manga_returns_201_pending(pool: PgPool) {
    let user = common::create_user(&pool, "uploader").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/v1/manga", &token_for(&user), create_payload("Berserk")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Berserk");
    assert_eq!(json["moderation_status"], "pending");
    assert_eq!(json["created_by"], user.id);
    assert_eq!(json["categories"], serde_json::json!(["Action", "Fantasy"]));
    assert_eq!(json["rating"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_manga_unknown_category_returns_400(pool: PgPool) {
    let user = common::create_user(&pool, "uploader").await;
    let app = common::build_test_app(pool);

    let mut payload = create_payload("Berserk");
    payload["categories"] = serde_json::json!(["Not A Real Category"]);
    let response = post_json_auth(app, "/api/v1/manga", &token_for(&user), payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Not A Real Category"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_manga_invalid_status_returns_400(pool: PgPool) {
    let user = common::create_user(&pool, "uploader").await;
    let app = common::build_test_app(pool);

    let mut payload = create_payload("Berserk");
    payload["status"] = serde_json::json!("finished");
    let response = post_json_auth(app, "/api/v1/manga", &token_for(&user), payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Moderation visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_pending_manga_hidden_from_public_and_others(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let other = common::create_user(&pool, "other").await;
    let manga = common::create_manga_entry(&pool, creator.id, "Hidden", &[]).await;
    let uri = format!("/api/v1/manga/{}", manga.id);

    // Anonymous: 404.
    let app = common::build_test_app(pool.clone());
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unrelated user: 404.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &token_for(&other)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Creator: 200.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &token_for(&creator)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Admin: 200.
    let admin = common::create_admin(&pool, "mod").await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approved_manga_is_public(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let manga = common::create_approved_manga(&pool, creator.id, "Public", &["Drama"]).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/manga/{}", manga.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Public");
    assert_eq!(json["user_review"], serde_json::Value::Null);
    assert_eq!(json["is_bookmarked"], false);

    // And it appears in the plain listing.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/manga").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_manga_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/manga/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_creator_can_update_manga(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let manga = common::create_approved_manga(&pool, creator.id, "Old Title", &[]).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/manga/{}", manga.id),
        &token_for(&creator),
        serde_json::json!({ "title": "New Title", "categories": ["Horror"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "New Title");
    assert_eq!(json["categories"], serde_json::json!(["Horror"]));
    // Untouched fields keep their values.
    assert_eq!(json["author"], "Seed Author");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_creator_update_returns_403(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let other = common::create_user(&pool, "other").await;
    let manga = common::create_approved_manga(&pool, creator.id, "Locked", &[]).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/manga/{}", manga.id),
        &token_for(&other),
        serde_json::json!({ "title": "Hijacked" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cover_upload_sets_cover_image(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let manga = common::create_approved_manga(&pool, creator.id, "Covered", &[]).await;
    let boundary = "X-MANGALIB-TEST-BOUNDARY";
    let body = common::multipart_body(boundary, &[], Some(("file", "cover.png", common::TINY_PNG)));

    let app = common::build_test_app(pool.clone());
    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/manga/{}/cover", manga.id))
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token_for(&creator)),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["cover_image"]
        .as_str()
        .unwrap()
        .ends_with("cover.png"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_can_update_any_manga(pool: PgPool) {
    let creator = common::create_user(&pool, "creator").await;
    let admin = common::create_admin(&pool, "mod").await;
    let manga = common::create_approved_manga(&pool, creator.id, "Fixable", &[]).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/manga/{}", manga.id),
        &token_for(&admin),
        serde_json::json!({ "status": "completed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
}
