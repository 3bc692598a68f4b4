//! Repository for the `reviews` table.
//!
//! The upsert keeps the manga's aggregate rating consistent: review row and
//! recomputed `rating` / `rating_count` are written in one transaction.

use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, ReviewWithUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, manga_id, text, rating, created_at, updated_at";

/// Provides review CRUD and aggregate-rating maintenance.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert or update the caller's review of a manga, then recompute the
    /// manga's average rating (rounded to 2 decimals) and rating count.
    ///
    /// Returns the review row and `true` when it was newly created.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        manga_id: DbId,
        text: &str,
        rating: f64,
    ) -> Result<(Review, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM reviews WHERE user_id = $1 AND manga_id = $2 FOR UPDATE")
                .bind(user_id)
                .bind(manga_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (review, created) = match existing {
            Some((id,)) => {
                let query = format!(
                    "UPDATE reviews SET text = $2, rating = $3, updated_at = NOW()
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                let review = sqlx::query_as::<_, Review>(&query)
                    .bind(id)
                    .bind(text)
                    .bind(rating)
                    .fetch_one(&mut *tx)
                    .await?;
                (review, false)
            }
            None => {
                let query = format!(
                    "INSERT INTO reviews (user_id, manga_id, text, rating)
                     VALUES ($1, $2, $3, $4)
                     RETURNING {COLUMNS}"
                );
                let review = sqlx::query_as::<_, Review>(&query)
                    .bind(user_id)
                    .bind(manga_id)
                    .bind(text)
                    .bind(rating)
                    .fetch_one(&mut *tx)
                    .await?;
                (review, true)
            }
        };

        // Recompute the aggregates from the review rows themselves rather
        // than adjusting incrementally, so the stored values can never drift.
        sqlx::query(
            "UPDATE manga SET
                rating = COALESCE((SELECT ROUND(AVG(rating)::numeric, 2)::double precision
                                   FROM reviews WHERE manga_id = $1), 0),
                rating_count = (SELECT COUNT(*) FROM reviews WHERE manga_id = $1)
             WHERE id = $1",
        )
        .bind(manga_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((review, created))
    }

    /// The caller's review of a manga, if any.
    pub async fn find_by_user_and_manga(
        pool: &PgPool,
        user_id: DbId,
        manga_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE user_id = $1 AND manga_id = $2"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(manga_id)
            .fetch_optional(pool)
            .await
    }

    /// All reviews of a manga with reviewer usernames, newest first.
    pub async fn list_for_manga(
        pool: &PgPool,
        manga_id: DbId,
    ) -> Result<Vec<ReviewWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithUser>(
            "SELECT r.id, r.user_id, u.username, r.manga_id, r.text, r.rating,
                    r.created_at, r.updated_at
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.manga_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(manga_id)
        .fetch_all(pool)
        .await
    }
}
