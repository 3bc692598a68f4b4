//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET  /      -> list (newest first)
/// POST /      -> create (admin)
/// GET  /{id}  -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list).post(news::create))
        .route("/{id}", get(news::get))
}
