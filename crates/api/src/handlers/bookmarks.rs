//! Handlers for bookmark and favourite toggles.

use axum::extract::{Path, State};
use axum::Json;
use mangalib_core::types::DbId;
use mangalib_db::repositories::BookmarkRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::manga::find_visible;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for the bookmark toggle.
#[derive(Debug, Serialize)]
pub struct BookmarkToggled {
    pub bookmarked: bool,
}

/// Response body for the favourite toggle.
#[derive(Debug, Serialize)]
pub struct FavouriteToggled {
    pub favourited: bool,
}

/// POST /api/v1/manga/{id}/bookmark
///
/// Toggle the caller's bookmark on a manga.
pub async fn toggle_bookmark(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
) -> AppResult<Json<BookmarkToggled>> {
    find_visible(&state.pool, manga_id, Some(&auth)).await?;

    let bookmarked = BookmarkRepo::toggle_bookmark(&state.pool, auth.user_id, manga_id).await?;

    tracing::info!(manga_id, user_id = auth.user_id, bookmarked, "Bookmark toggled");

    Ok(Json(BookmarkToggled { bookmarked }))
}

/// POST /api/v1/manga/{id}/favourite
///
/// Toggle the caller's favourite on a manga.
pub async fn toggle_favourite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
) -> AppResult<Json<FavouriteToggled>> {
    find_visible(&state.pool, manga_id, Some(&auth)).await?;

    let favourited = BookmarkRepo::toggle_favourite(&state.pool, auth.user_id, manga_id).await?;

    tracing::info!(manga_id, user_id = auth.user_id, favourited, "Favourite toggled");

    Ok(Json(FavouriteToggled { favourited }))
}
