//! Repository for the `news` table.

use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, body, image, created_by, created_at";

/// Provides CRUD operations for news posts.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a news post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNews,
        created_by: DbId,
    ) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, body, image, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.image)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a news post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List news posts, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
