pub mod auth;
pub mod catalog;
pub mod health;
pub mod manga;
pub mod moderation;
pub mod news;
pub mod persons;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/verify                         verify access token (public)
/// /auth/logout                         logout (requires auth)
///
/// /users/me                            get, update own profile
/// /users/me/avatar                     upload avatar (PUT, multipart)
/// /users/{username}                    public profile
/// /users/{username}/avatar             raw avatar bytes
/// /users/{username}/bookmarks          public bookmark listing
///
/// /manga                               list approved, create (auth)
/// /manga/{id}                          detail (public for approved), update
/// /manga/{id}/bookmark                 toggle bookmark (POST, auth)
/// /manga/{id}/favourite                toggle favourite (POST, auth)
/// /manga/{id}/reviews                  list, upsert own review
/// /manga/{id}/moderation               admin decision (POST)
/// /manga/{id}/chapters                 ZIP chapter upload (POST, multipart)
/// /manga/{id}/volumes                  volumes & chapters listing
/// /manga/{id}/pages                    reader payload (?volume=&chapter=)
///
/// /catalog                             filtered/sorted/paginated browse
/// /catalog/popular                     most-reviewed shelf
/// /catalog/new                         newest-releases shelf
/// /search/{field}                      title|author|artist search (?q=)
/// /categories                          list, create (admin)
/// /statuses                            publication statuses
///
/// /persons                             list approved, create (auth)
/// /persons/{id}                        detail
/// /persons/{id}/moderation             admin decision (POST)
///
/// /moderation/manga                    pending manga queue (admin)
/// /moderation/persons                  pending persons queue (admin)
///
/// /news                                list, create (admin)
/// /news/{id}                           detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, refresh, verify, logout).
        .nest("/auth", auth::router())
        // Profiles, avatars, public bookmark listings.
        .nest("/users", users::router())
        // Manga CRUD plus per-manga sub-resources (bookmarks, reviews,
        // moderation decision, chapters).
        .nest("/manga", manga::router())
        // Person entries (authors, publishers, artists).
        .nest("/persons", persons::router())
        // Editorial news.
        .nest("/news", news::router())
        // Pending moderation queues.
        .nest("/moderation", moderation::router())
        // Catalog browse, shelves, search, categories, statuses.
        .merge(catalog::router())
}
