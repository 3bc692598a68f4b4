//! Chapter page entity model and DTOs.

use mangalib_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `manga_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MangaPage {
    pub id: DbId,
    pub manga_id: DbId,
    pub volume: i32,
    pub chapter: i32,
    pub chapter_title: String,
    pub page_number: i32,
    /// Path relative to the media root.
    pub image_path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
}

/// A page prepared for insertion by the chapter upload handler.
#[derive(Debug)]
pub struct NewPage {
    pub page_number: i32,
    pub image_path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// One (volume, chapter) group in the volumes listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChapterSummary {
    pub volume: i32,
    pub chapter: i32,
    pub chapter_title: String,
    /// Page count of the chapter.
    pub pages: i64,
}
