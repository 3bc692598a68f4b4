//! Review entity model and DTOs.

use mangalib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub manga_id: DbId,
    pub text: String,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review joined with the reviewer's username, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub manga_id: DbId,
    pub text: String,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for the review upsert endpoint.
#[derive(Debug, Deserialize)]
pub struct UpsertReview {
    pub text: String,
    pub rating: f64,
}
