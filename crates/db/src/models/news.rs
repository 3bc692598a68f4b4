//! News post entity model and DTOs.

use mangalib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a news post.
#[derive(Debug, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
}
