//! Handlers for the `/news` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::catalog::{clamp_limit, clamp_offset};
use mangalib_core::error::CoreError;
use mangalib_core::types::DbId;
use mangalib_db::models::news::{CreateNews, News};
use mangalib_db::repositories::NewsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a news title.
const MAX_TITLE_LEN: usize = 128;

/// GET /api/v1/news
///
/// News posts, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let news = NewsRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: news }))
}

/// GET /api/v1/news/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(news_id): Path<DbId>,
) -> AppResult<Json<News>> {
    let news = NewsRepo::find_by_id(&state.pool, news_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "News",
            id: news_id,
        }))?;
    Ok(Json(news))
}

/// POST /api/v1/news
///
/// Publish a news post. Admin only.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNews>,
) -> AppResult<(StatusCode, Json<News>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    if input.title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        ))));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Body must not be empty".into(),
        )));
    }

    let news = NewsRepo::create(&state.pool, &input, admin.user_id).await?;

    tracing::info!(news_id = news.id, user_id = admin.user_id, "News published");

    Ok((StatusCode::CREATED, Json(news)))
}
