//! Handlers for manga reviews.
//!
//! A user has at most one review per manga; posting again updates it. The
//! manga's aggregate rating is recomputed in the same transaction as the
//! review write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::error::CoreError;
use mangalib_core::review::{validate_rating, validate_text};
use mangalib_core::types::DbId;
use mangalib_db::models::review::UpsertReview;
use mangalib_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::manga::find_visible;
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/manga/{id}/reviews
///
/// Insert or update the caller's review. 201 on first write, 200 on update.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    Json(input): Json<UpsertReview>,
) -> AppResult<impl IntoResponse> {
    validate_text(&input.text).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_rating(input.rating).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    find_visible(&state.pool, manga_id, Some(&auth)).await?;

    let (review, created) =
        ReviewRepo::upsert(&state.pool, auth.user_id, manga_id, &input.text, input.rating).await?;

    tracing::info!(
        manga_id,
        user_id = auth.user_id,
        rating = input.rating,
        created,
        "Review saved"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(review)))
}

/// GET /api/v1/manga/{id}/reviews
///
/// All reviews of a manga with reviewer usernames, newest first.
pub async fn list(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_visible(&state.pool, manga_id, user.as_ref()).await?;

    let reviews = ReviewRepo::list_for_manga(&state.pool, manga_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}
