//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent straight to the router via `tower::ServiceExt::oneshot`,
//! so no TCP listener is involved. Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mangalib_api::auth::jwt::{generate_access_token, JwtConfig};
use mangalib_api::auth::password::hash_password;
use mangalib_api::config::ServerConfig;
use mangalib_api::router::build_app_router;
use mangalib_api::state::AppState;
use mangalib_core::roles::role_name;
use mangalib_db::models::manga::{CreateManga, Manga};
use mangalib_db::models::user::{CreateUser, User};
use mangalib_db::repositories::{CategoryRepo, MangaRepo, UserRepo};

/// Secret shared by [`test_config`] and [`token_for`].
const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Media root used by all test apps.
pub fn test_media_root() -> PathBuf {
    std::env::temp_dir().join("mangalib-test-media")
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: test_media_root(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    std::fs::create_dir_all(&config.media_root).expect("media root should be creatable");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with no body (toggle endpoints).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart/form-data body built with [`multipart_body`].
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    boundary: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Plaintext password used by all seeded test users.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create a regular user directly in the database.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        about: "Test user".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a user and promote it to admin.
pub async fn create_admin(pool: &PgPool, username: &str) -> User {
    let user = create_user(pool, username).await;
    sqlx::query("UPDATE users SET is_admin = true WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("promotion should succeed");
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
}

/// Mint an access token for a seeded user without the login round-trip.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, role_name(user.is_admin), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a manga entry directly via the repository (pending moderation).
pub async fn create_manga_entry(
    pool: &PgPool,
    created_by: i64,
    title: &str,
    categories: &[&str],
) -> Manga {
    let names: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
    let found = CategoryRepo::find_by_names(pool, &names)
        .await
        .expect("category lookup should succeed");
    assert_eq!(found.len(), names.len(), "unknown seed category");
    let ids: Vec<i64> = found.iter().map(|c| c.id).collect();

    let input = CreateManga {
        title: title.to_string(),
        author: "Seed Author".to_string(),
        artist: "Seed Artist".to_string(),
        description: String::new(),
        release_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        status: "ongoing".to_string(),
        categories: names,
    };
    MangaRepo::create(pool, &input, &ids, created_by)
        .await
        .expect("manga creation should succeed")
}

/// Create a manga entry and approve it.
pub async fn create_approved_manga(
    pool: &PgPool,
    created_by: i64,
    title: &str,
    categories: &[&str],
) -> Manga {
    let manga = create_manga_entry(pool, created_by, title, categories).await;
    MangaRepo::set_moderation(pool, manga.id, "approved")
        .await
        .expect("moderation should succeed")
        .expect("manga should exist")
}

/// Overwrite a manga's aggregate rating fields for sort tests.
pub async fn set_rating(pool: &PgPool, manga_id: i64, rating: f64, count: i32) {
    sqlx::query("UPDATE manga SET rating = $2, rating_count = $3 WHERE id = $1")
        .bind(manga_id)
        .bind(rating)
        .bind(count)
        .execute(pool)
        .await
        .expect("rating update should succeed");
}

// ---------------------------------------------------------------------------
// Multipart / archive builders
// ---------------------------------------------------------------------------

/// A valid 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Build an in-memory ZIP archive from `(entry_name, bytes)` pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).expect("start_file");
            writer.write_all(data).expect("write entry");
        }
        writer.finish().expect("finish zip");
    }
    cursor.into_inner()
}

/// Build a multipart/form-data body with text fields and one optional file.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, filename, data)) = file {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
