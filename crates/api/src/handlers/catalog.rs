//! Handlers for catalog browsing: filtered/sorted listing, popular and
//! new-release shelves, column search, categories, and statuses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::catalog::{
    clamp_limit, clamp_offset, CatalogSort, SearchField, SortOrder, SHELF_SIZE,
};
use mangalib_core::error::CoreError;
use mangalib_core::manga::{validate_status, PUBLICATION_STATUSES};
use mangalib_db::models::manga::{CatalogPage, CatalogParams};
use mangalib_db::repositories::{CategoryRepo, MangaRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::manga::with_categories;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of results returned by a search.
const SEARCH_LIMIT: i64 = 50;

/// Query parameters for `GET /catalog`.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Comma-separated category names; a manga matches when it has any.
    pub categories: Option<String>,
    pub status: Option<String>,
    pub sort: Option<CatalogSort>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query parameters for the shelves.
#[derive(Debug, Deserialize)]
pub struct ShelfQuery {
    pub limit: Option<i64>,
}

/// Request body for `POST /categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

/// GET /api/v1/catalog
///
/// Approved manga filtered by category/status, sorted and paginated.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<CatalogPage>> {
    if let Some(status) = &query.status {
        validate_status(status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let categories: Vec<String> = query
        .categories
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let params = CatalogParams {
        categories,
        status: query.status,
        sort: query.sort.unwrap_or_default(),
        order: query.order,
        limit: clamp_limit(query.limit),
        offset: clamp_offset(query.offset),
    };

    let (manga, total) = MangaRepo::catalog(&state.pool, &params).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(CatalogPage { items, total }))
}

/// GET /api/v1/catalog/popular
///
/// Most-reviewed approved manga.
pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(SHELF_SIZE).clamp(1, SHELF_SIZE * 10);
    let manga = MangaRepo::popular(&state.pool, limit).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/catalog/new
///
/// Most recently released approved manga.
pub async fn new_releases(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(SHELF_SIZE).clamp(1, SHELF_SIZE * 10);
    let manga = MangaRepo::new_releases(&state.pool, limit).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/search/{field}
///
/// Case-insensitive substring search over `title`, `author`, or `artist`.
pub async fn search(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let field = SearchField::from_segment(&field).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown search field '{field}'. Must be one of: title, author, artist"
        ))
    })?;

    let term = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter 'q'".into()))?;

    let manga = MangaRepo::search(&state.pool, field, term, SEARCH_LIMIT).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/categories
///
/// All categories, alphabetically.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a category. Admin only; duplicate names return 409.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Category name must not be empty".into()));
    }
    if name.chars().count() > 64 {
        return Err(AppError::BadRequest(
            "Category name must be at most 64 characters".into(),
        ));
    }

    let category = CategoryRepo::create(&state.pool, name).await?;

    tracing::info!(category_id = category.id, user_id = admin.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/statuses
///
/// The fixed set of publication statuses.
pub async fn list_statuses() -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: PUBLICATION_STATUSES,
    })
}
