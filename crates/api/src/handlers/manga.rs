//! Handlers for the `/manga` resource.
//!
//! Moderation gates visibility: approved entries are public; pending and
//! rejected entries are only visible to their creator and admins.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::catalog::{clamp_limit, clamp_offset};
use mangalib_core::error::CoreError;
use mangalib_core::manga::{validate_credit, validate_status, validate_title};
use mangalib_core::moderation::STATUS_APPROVED;
use mangalib_core::types::DbId;
use mangalib_db::models::manga::{CreateManga, Manga, MangaResponse, UpdateManga};
use mangalib_db::models::review::Review;
use mangalib_db::repositories::{BookmarkRepo, CategoryRepo, MangaRepo, ReviewRepo};
use mangalib_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

/// Detail view payload: the manga plus caller-specific context.
#[derive(Debug, Serialize)]
pub struct MangaDetail {
    #[serde(flatten)]
    pub manga: MangaResponse,
    /// The caller's review, when authenticated and present.
    pub user_review: Option<Review>,
    /// Whether the caller has bookmarked this manga.
    pub is_bookmarked: bool,
}

/// POST /api/v1/manga
///
/// Create a manga entry. The entry starts in the `pending` moderation state
/// and only becomes publicly visible once approved.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateManga>,
) -> AppResult<(StatusCode, Json<MangaResponse>)> {
    validate_input(&input)?;

    let category_ids = resolve_categories(&state.pool, &input.categories).await?;
    let manga = MangaRepo::create(&state.pool, &input, &category_ids, auth.user_id).await?;

    tracing::info!(manga_id = manga.id, user_id = auth.user_id, "Manga created");

    let categories = CategoryRepo::names_for_manga(&state.pool, manga.id).await?;
    Ok((StatusCode::CREATED, Json(MangaResponse { manga, categories })))
}

/// GET /api/v1/manga/{id}
///
/// Detail view. For authenticated callers the response embeds their own
/// review and bookmark state.
pub async fn get(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
) -> AppResult<Json<MangaDetail>> {
    let manga = find_visible(&state.pool, manga_id, user.as_ref()).await?;

    let (user_review, is_bookmarked) = match &user {
        Some(auth) => {
            let review =
                ReviewRepo::find_by_user_and_manga(&state.pool, auth.user_id, manga_id).await?;
            let bookmarked = BookmarkRepo::is_bookmarked(&state.pool, auth.user_id, manga_id).await?;
            (review, bookmarked)
        }
        None => (None, false),
    };

    let categories = CategoryRepo::names_for_manga(&state.pool, manga.id).await?;
    Ok(Json(MangaDetail {
        manga: MangaResponse { manga, categories },
        user_review,
        is_bookmarked,
    }))
}

/// PUT /api/v1/manga/{id}
///
/// Partial metadata update by the entry's creator or an admin.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    Json(input): Json<UpdateManga>,
) -> AppResult<Json<MangaResponse>> {
    let manga = find_by_id(&state.pool, manga_id).await?;
    ensure_owner_or_admin(&manga, &auth)?;

    if let Some(title) = &input.title {
        validate_title(title).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(author) = &input.author {
        validate_credit("Author", author).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(artist) = &input.artist {
        validate_credit("Artist", artist).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(status) = &input.status {
        validate_status(status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category_ids = match &input.categories {
        Some(names) => Some(resolve_categories(&state.pool, names).await?),
        None => None,
    };

    let manga = MangaRepo::update(&state.pool, manga_id, &input, category_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: manga_id,
        }))?;

    tracing::info!(manga_id, user_id = auth.user_id, "Manga updated");

    let categories = CategoryRepo::names_for_manga(&state.pool, manga.id).await?;
    Ok(Json(MangaResponse { manga, categories }))
}

/// PUT /api/v1/manga/{id}/cover
///
/// Multipart upload of the cover image (`file` field). Creator or admin.
pub async fn upload_cover(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<MangaResponse>> {
    let manga = find_by_id(&state.pool, manga_id).await?;
    ensure_owner_or_admin(&manga, &auth)?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("cover.png").to_string();
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

    let relative = format!("manga/{manga_id}/cover.{ext}");
    storage::write_media(&state.config.media_root, &relative, &data).await?;
    MangaRepo::set_cover_image(&state.pool, manga_id, &relative).await?;

    tracing::info!(manga_id, user_id = auth.user_id, path = %relative, "Cover updated");

    let manga = find_by_id(&state.pool, manga_id).await?;
    let categories = CategoryRepo::names_for_manga(&state.pool, manga.id).await?;
    Ok(Json(MangaResponse { manga, categories }))
}

/// GET /api/v1/manga
///
/// All approved manga, most recently added first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let manga = MangaRepo::list_approved(&state.pool, limit, offset).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Helpers shared with other handler modules
// ---------------------------------------------------------------------------

/// Fetch a manga or 404.
pub(crate) async fn find_by_id(pool: &DbPool, manga_id: DbId) -> AppResult<Manga> {
    MangaRepo::find_by_id(pool, manga_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: manga_id,
        }))
}

/// Fetch a manga and enforce the moderation visibility rule: approved
/// entries are public, everything else 404s unless the caller is the
/// creator or an admin.
pub(crate) async fn find_visible(
    pool: &DbPool,
    manga_id: DbId,
    user: Option<&AuthUser>,
) -> AppResult<Manga> {
    let manga = find_by_id(pool, manga_id).await?;
    if manga.moderation_status == STATUS_APPROVED {
        return Ok(manga);
    }
    let allowed = user.is_some_and(|u| u.is_admin() || manga.created_by == Some(u.user_id));
    if allowed {
        Ok(manga)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: manga_id,
        }))
    }
}

/// Reject callers that are neither the entry's creator nor an admin.
pub(crate) fn ensure_owner_or_admin(manga: &Manga, auth: &AuthUser) -> AppResult<()> {
    if auth.is_admin() || manga.created_by == Some(auth.user_id) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only the creator or an admin may modify this manga".into(),
        )))
    }
}

/// Attach category names to a batch of manga rows with one query.
pub(crate) async fn with_categories(
    pool: &DbPool,
    manga: Vec<Manga>,
) -> AppResult<Vec<MangaResponse>> {
    let ids: Vec<DbId> = manga.iter().map(|m| m.id).collect();
    let pairs = CategoryRepo::names_for_many(pool, &ids).await?;

    let mut by_manga: HashMap<DbId, Vec<String>> = HashMap::new();
    for (manga_id, name) in pairs {
        by_manga.entry(manga_id).or_default().push(name);
    }

    Ok(manga
        .into_iter()
        .map(|m| {
            let categories = by_manga.remove(&m.id).unwrap_or_default();
            MangaResponse { manga: m, categories }
        })
        .collect())
}

/// Resolve category names to ids, rejecting unknown names.
async fn resolve_categories(pool: &DbPool, names: &[String]) -> AppResult<Vec<DbId>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let found = CategoryRepo::find_by_names(pool, names).await?;
    if found.len() != names.len() {
        let known: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        let missing: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|n| !known.contains(n))
            .collect();
        return Err(AppError::BadRequest(format!(
            "Unknown categories: {}",
            missing.join(", ")
        )));
    }
    Ok(found.into_iter().map(|c| c.id).collect())
}

/// Validate the create payload.
fn validate_input(input: &CreateManga) -> AppResult<()> {
    validate_title(&input.title).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_credit("Author", &input.author)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_credit("Artist", &input.artist)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_status(&input.status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    Ok(())
}
