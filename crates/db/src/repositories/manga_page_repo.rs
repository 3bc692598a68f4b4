//! Repository for the `manga_pages` table.
//!
//! Chapter uploads replace all pages of a (volume, chapter) pair and keep
//! the manga's distinct-chapter count in sync, inside one transaction.

use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::manga_page::{ChapterSummary, MangaPage, NewPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, manga_id, volume, chapter, chapter_title, page_number, image_path, \
                       width, height, created_at";

/// Provides chapter page storage and reading queries.
pub struct MangaPageRepo;

impl MangaPageRepo {
    /// Replace the pages of one chapter and refresh the manga's chapter
    /// count. Returns the number of pages stored.
    pub async fn replace_chapter(
        pool: &PgPool,
        manga_id: DbId,
        volume: i32,
        chapter: i32,
        chapter_title: &str,
        pages: &[NewPage],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM manga_pages WHERE manga_id = $1 AND volume = $2 AND chapter = $3",
        )
        .bind(manga_id)
        .bind(volume)
        .bind(chapter)
        .execute(&mut *tx)
        .await?;

        for page in pages {
            sqlx::query(
                "INSERT INTO manga_pages
                    (manga_id, volume, chapter, chapter_title, page_number, image_path, width, height)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(manga_id)
            .bind(volume)
            .bind(chapter)
            .bind(chapter_title)
            .bind(page.page_number)
            .bind(&page.image_path)
            .bind(page.width)
            .bind(page.height)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE manga SET chapters =
                (SELECT COUNT(DISTINCT (volume, chapter)) FROM manga_pages WHERE manga_id = $1)
             WHERE id = $1",
        )
        .bind(manga_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(pages.len())
    }

    /// Per-chapter summaries for a manga, ordered by volume then chapter.
    pub async fn chapter_summaries(
        pool: &PgPool,
        manga_id: DbId,
    ) -> Result<Vec<ChapterSummary>, sqlx::Error> {
        sqlx::query_as::<_, ChapterSummary>(
            "SELECT volume, chapter, chapter_title, COUNT(*) AS pages
             FROM manga_pages
             WHERE manga_id = $1
             GROUP BY volume, chapter, chapter_title
             ORDER BY volume, chapter",
        )
        .bind(manga_id)
        .fetch_all(pool)
        .await
    }

    /// Pages of one chapter in reading order.
    pub async fn pages_for_chapter(
        pool: &PgPool,
        manga_id: DbId,
        volume: i32,
        chapter: i32,
    ) -> Result<Vec<MangaPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga_pages
             WHERE manga_id = $1 AND volume = $2 AND chapter = $3
             ORDER BY page_number"
        );
        sqlx::query_as::<_, MangaPage>(&query)
            .bind(manga_id)
            .bind(volume)
            .bind(chapter)
            .fetch_all(pool)
            .await
    }
}
