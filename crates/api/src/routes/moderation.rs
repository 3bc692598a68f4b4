//! Route definitions for the pending moderation queues.
//!
//! The decision endpoints live with their resources
//! (`/manga/{id}/moderation`, `/persons/{id}/moderation`).

use axum::routing::get;
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Routes mounted at `/moderation`. Admin only.
///
/// ```text
/// GET /manga    -> pending manga queue
/// GET /persons  -> pending persons queue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/manga", get(moderation::pending_manga))
        .route("/persons", get(moderation::pending_persons))
}
