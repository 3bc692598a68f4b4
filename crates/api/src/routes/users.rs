//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /me                     -> own profile (requires auth)
/// PUT /me                     -> update own profile
/// PUT /me/avatar              -> upload avatar (multipart)
/// GET /{username}             -> public profile
/// GET /{username}/avatar      -> raw avatar bytes
/// GET /{username}/bookmarks   -> public bookmark listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/me/avatar", put(users::upload_avatar))
        .route("/{username}", get(users::by_username))
        .route("/{username}/avatar", get(users::avatar))
        .route("/{username}/bookmarks", get(users::bookmarks))
}
