//! Handlers for the `/users` resource: profiles, avatars, and public
//! bookmark listings.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::error::CoreError;
use mangalib_core::users::{validate_about, validate_email, validate_username};
use mangalib_db::models::user::{UpdateUser, User, UserChanges, UserResponse};
use mangalib_db::repositories::{BookmarkRepo, UserRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::manga::with_categories;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

/// GET /api/v1/users/me
///
/// The authenticated user's own profile.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/me
///
/// Partial profile update. A provided `password` is re-hashed; uniqueness of
/// username/email is enforced by the database (409 on conflict).
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(username) = &input.username {
        validate_username(username).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(email) = &input.email {
        validate_email(email).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(about) = &input.about {
        validate_about(about).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let password_hash = match &input.password {
        Some(password) => {
            if password.chars().count() < mangalib_core::users::MIN_PASSWORD_LEN {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Password must be at least {} characters long",
                    mangalib_core::users::MIN_PASSWORD_LEN
                ))));
            }
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let changes = UserChanges {
        username: input.username,
        email: input.email,
        about: input.about,
        password_hash,
    };

    let user = UserRepo::update(&state.pool, auth.user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(user.into()))
}

/// GET /api/v1/users/{username}
///
/// Public profile lookup by username.
pub async fn by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user_by_name(&state, &username).await?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/{username}/avatar
///
/// Raw profile image bytes. 404 when the user has no image or the file is
/// missing on disk.
pub async fn avatar(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = find_user_by_name(&state, &username).await?;

    let relative = user.profile_image.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Avatar",
        id: user.id,
    }))?;

    let path = state.config.media_root.join(&relative);
    let bytes = tokio::fs::read(&path).await.map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: "Avatar",
            id: user.id,
        })
    })?;

    let content_type = storage::content_type_for(&relative);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

/// PUT /api/v1/users/me/avatar
///
/// Multipart upload of a new profile image (`file` field).
pub async fn upload_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UserResponse>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("avatar.png").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let ext = mangalib_core::pages::page_extension(&filename).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported image type. Supported: {}",
            mangalib_core::pages::SUPPORTED_PAGE_EXTENSIONS.join(", ")
        ))
    })?;

    let relative = format!("users/{}.{ext}", auth.user_id);
    storage::write_media(&state.config.media_root, &relative, &data).await?;
    UserRepo::set_profile_image(&state.pool, auth.user_id, &relative).await?;

    tracing::info!(user_id = auth.user_id, path = %relative, "Avatar updated");

    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/{username}/bookmarks
///
/// The user's bookmarked manga (approved entries only).
pub async fn bookmarks(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = find_user_by_name(&state, &username).await?;
    let manga = BookmarkRepo::bookmarks_for_user(&state.pool, user.id).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: mangalib_core::types::DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn find_user_by_name(state: &AppState, username: &str) -> AppResult<User> {
    UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))
}
