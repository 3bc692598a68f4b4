//! Repository for the `user_bookmarks` and `user_favourites` join tables.

use mangalib_core::moderation::STATUS_APPROVED;
use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::manga::Manga;

/// Provides bookmark and favourite toggles plus listings.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Toggle a bookmark. Returns `true` when the manga is now bookmarked.
    pub async fn toggle_bookmark(
        pool: &PgPool,
        user_id: DbId,
        manga_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        toggle(pool, "user_bookmarks", user_id, manga_id).await
    }

    /// Toggle a favourite. Returns `true` when the manga is now favourited.
    pub async fn toggle_favourite(
        pool: &PgPool,
        user_id: DbId,
        manga_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        toggle(pool, "user_favourites", user_id, manga_id).await
    }

    /// Whether the user has bookmarked the manga.
    pub async fn is_bookmarked(
        pool: &PgPool,
        user_id: DbId,
        manga_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM user_bookmarks WHERE user_id = $1 AND manga_id = $2)",
        )
        .bind(user_id)
        .bind(manga_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// A user's bookmarked manga (approved entries only), most recently
    /// bookmarked first.
    pub async fn bookmarks_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Manga>, sqlx::Error> {
        sqlx::query_as::<_, Manga>(
            "SELECT m.id, m.title, m.author, m.artist, m.description, m.release_date, m.status,
                    m.chapters, m.cover_image, m.rating, m.rating_count, m.moderation_status,
                    m.created_by, m.created_at
             FROM manga m
             JOIN user_bookmarks b ON b.manga_id = m.id
             WHERE b.user_id = $1 AND m.moderation_status = $2
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .bind(STATUS_APPROVED)
        .fetch_all(pool)
        .await
    }
}

/// Delete-then-insert toggle over one of the two join tables.
///
/// `table` is a fixed identifier supplied by the wrappers above, never user
/// input.
async fn toggle(
    pool: &PgPool,
    table: &str,
    user_id: DbId,
    manga_id: DbId,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let delete = format!("DELETE FROM {table} WHERE user_id = $1 AND manga_id = $2");
    let removed = sqlx::query(&delete)
        .bind(user_id)
        .bind(manga_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let now_present = if removed == 0 {
        let insert = format!("INSERT INTO {table} (user_id, manga_id) VALUES ($1, $2)");
        sqlx::query(&insert)
            .bind(user_id)
            .bind(manga_id)
            .execute(&mut *tx)
            .await?;
        true
    } else {
        false
    };

    tx.commit().await?;
    Ok(now_present)
}
