//! Route definitions for the `/persons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{moderation, persons};
use crate::state::AppState;

/// Routes mounted at `/persons`.
///
/// ```text
/// GET  /                -> list approved (?kind=&q=)
/// POST /                -> create (requires auth, enters moderation)
/// GET  /{id}            -> detail
/// POST /{id}/moderation -> admin decision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(persons::list).post(persons::create))
        .route("/{id}", get(persons::get))
        .route("/{id}/moderation", post(moderation::moderate_person))
}
