//! Person (author / publisher / artist) entity model and DTOs.

use mangalib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `persons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub nickname: String,
    pub country: String,
    /// One of `author`, `publisher`, `artist`.
    pub kind: String,
    pub about: String,
    pub profile_image: Option<String>,
    pub moderation_status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a person entry.
#[derive(Debug, Deserialize)]
pub struct CreatePerson {
    pub nickname: String,
    #[serde(default)]
    pub country: String,
    pub kind: String,
    #[serde(default)]
    pub about: String,
}

/// Query parameters for the person listing.
#[derive(Debug, Deserialize)]
pub struct PersonListParams {
    pub kind: Option<String>,
    /// Case-insensitive nickname substring filter.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
