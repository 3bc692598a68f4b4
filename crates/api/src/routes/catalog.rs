//! Route definitions for catalog browsing, search, categories, and statuses.
//!
//! Mounted at the API root (not nested) because the paths span several
//! top-level prefixes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET  /catalog          -> filtered/sorted/paginated browse
/// GET  /catalog/popular  -> most-reviewed shelf
/// GET  /catalog/new      -> newest-releases shelf
/// GET  /search/{field}   -> title|author|artist search (?q=)
/// GET  /categories       -> list categories
/// POST /categories       -> create category (admin)
/// GET  /statuses         -> publication statuses
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog::browse))
        .route("/catalog/popular", get(catalog::popular))
        .route("/catalog/new", get(catalog::new_releases))
        .route("/search/{field}", get(catalog::search))
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route("/statuses", get(catalog::list_statuses))
}
