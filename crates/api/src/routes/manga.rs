//! Route definitions for the `/manga` resource and its sub-resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{bookmarks, chapters, manga, moderation, reviews};
use crate::state::AppState;

/// Routes mounted at `/manga`.
///
/// ```text
/// GET  /                -> list approved
/// POST /                -> create (requires auth, enters moderation)
/// GET  /{id}            -> detail (approved public; else creator/admin)
/// PUT  /{id}            -> update (creator or admin)
/// PUT  /{id}/cover      -> upload cover image (multipart)
/// POST /{id}/bookmark   -> toggle bookmark
/// POST /{id}/favourite  -> toggle favourite
/// GET  /{id}/reviews    -> list reviews
/// POST /{id}/reviews    -> upsert own review
/// POST /{id}/moderation -> admin decision
/// POST /{id}/chapters   -> ZIP chapter upload (multipart)
/// GET  /{id}/volumes    -> volumes & chapters listing
/// GET  /{id}/pages      -> reader payload (?volume=&chapter=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manga::list).post(manga::create))
        .route("/{id}", get(manga::get).put(manga::update))
        .route("/{id}/cover", put(manga::upload_cover))
        .route("/{id}/bookmark", post(bookmarks::toggle_bookmark))
        .route("/{id}/favourite", post(bookmarks::toggle_favourite))
        .route("/{id}/reviews", get(reviews::list).post(reviews::upsert))
        .route("/{id}/moderation", post(moderation::moderate_manga))
        .route("/{id}/chapters", post(chapters::upload))
        .route("/{id}/volumes", get(chapters::volumes))
        .route("/{id}/pages", get(chapters::pages))
}
