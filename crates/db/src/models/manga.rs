//! Manga entity model and DTOs.

use chrono::NaiveDate;
use mangalib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `manga` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Manga {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub artist: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Publication status (`ongoing`, `completed`, ...).
    pub status: String,
    /// Count of distinct uploaded chapters.
    pub chapters: i32,
    pub cover_image: Option<String>,
    /// Average review rating, rounded to 2 decimals.
    pub rating: f64,
    pub rating_count: i32,
    /// Moderation workflow state (`pending`, `approved`, `rejected`).
    pub moderation_status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// A manga row together with its resolved category names.
#[derive(Debug, Clone, Serialize)]
pub struct MangaResponse {
    #[serde(flatten)]
    pub manga: Manga,
    pub categories: Vec<String>,
}

/// DTO for creating a manga entry.
#[derive(Debug, Deserialize)]
pub struct CreateManga {
    pub title: String,
    pub author: String,
    pub artist: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub status: String,
    /// Category names; every name must exist in the `categories` table.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// DTO for updating a manga entry. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateManga {
    pub title: Option<String>,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Filter/sort/pagination parameters for the catalog query.
#[derive(Debug, Default)]
pub struct CatalogParams {
    /// Category names; a manga matches when it has any of them.
    pub categories: Vec<String>,
    /// Publication status filter.
    pub status: Option<String>,
    pub sort: mangalib_core::catalog::CatalogSort,
    pub order: Option<mangalib_core::catalog::SortOrder>,
    pub limit: i64,
    pub offset: i64,
}

/// A page of catalog results plus the unpaginated total.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub items: Vec<MangaResponse>,
    pub total: i64,
}
