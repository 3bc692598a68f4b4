//! Repository for the `manga` table.

use mangalib_core::catalog::{direction, SearchField};
use mangalib_core::moderation::STATUS_APPROVED;
use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::manga::{CatalogParams, CreateManga, Manga, UpdateManga};
use crate::repositories::CategoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, artist, description, release_date, status, chapters, \
                       cover_image, rating, rating_count, moderation_status, created_by, created_at";

/// Column list qualified with the `m` alias for joined/filtered queries.
const QUALIFIED_COLUMNS: &str =
    "m.id, m.title, m.author, m.artist, m.description, m.release_date, m.status, m.chapters, \
     m.cover_image, m.rating, m.rating_count, m.moderation_status, m.created_by, m.created_at";

/// Shared catalog filter clause. `$1` is an optional publication status,
/// `$2` an array of category names (empty = no filter).
const CATALOG_FILTER: &str = "m.moderation_status = 'approved'
      AND ($1::varchar IS NULL OR m.status = $1)
      AND (cardinality($2::text[]) = 0 OR EXISTS (
            SELECT 1 FROM manga_categories mc
            JOIN categories c ON c.id = mc.category_id
            WHERE mc.manga_id = m.id AND c.name = ANY($2)))";

/// Provides CRUD, catalog, and moderation operations for manga.
pub struct MangaRepo;

impl MangaRepo {
    /// Insert a manga with its category associations in one transaction.
    ///
    /// New entries always start in the `pending` moderation state.
    pub async fn create(
        pool: &PgPool,
        input: &CreateManga,
        category_ids: &[DbId],
        created_by: DbId,
    ) -> Result<Manga, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO manga (title, author, artist, description, release_date, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let manga = sqlx::query_as::<_, Manga>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.artist)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(&input.status)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        CategoryRepo::set_for_manga(&mut tx, manga.id, category_ids).await?;
        tx.commit().await?;
        Ok(manga)
    }

    /// Find a manga by ID regardless of moderation state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE id = $1");
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a manga's metadata. Only non-`None` fields are applied; when
    /// `category_ids` is `Some` the category set is replaced.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManga,
        category_ids: Option<&[DbId]>,
    ) -> Result<Option<Manga>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE manga SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                artist = COALESCE($4, artist),
                description = COALESCE($5, description),
                release_date = COALESCE($6, release_date),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let manga = sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.artist)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(manga) = manga else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(ids) = category_ids {
            CategoryRepo::set_for_manga(&mut tx, manga.id, ids).await?;
        }
        tx.commit().await?;
        Ok(Some(manga))
    }

    /// List approved manga, most recently added first.
    pub async fn list_approved(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Manga>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga
             WHERE moderation_status = $1
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(STATUS_APPROVED)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Catalog query: approved manga filtered by status/categories, sorted
    /// and paginated. Returns the page plus the unpaginated total.
    pub async fn catalog(
        pool: &PgPool,
        params: &CatalogParams,
    ) -> Result<(Vec<Manga>, i64), sqlx::Error> {
        let dir = direction(params.sort, params.order);
        let column = params.sort.column();

        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM manga m
             WHERE {CATALOG_FILTER}
             ORDER BY m.{column} {dir}, m.id
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Manga>(&query)
            .bind(&params.status)
            .bind(&params.categories)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM manga m WHERE {CATALOG_FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&params.status)
            .bind(&params.categories)
            .fetch_one(pool)
            .await?;

        Ok((items, total))
    }

    /// Most-reviewed approved manga.
    pub async fn popular(pool: &PgPool, limit: i64) -> Result<Vec<Manga>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga
             WHERE moderation_status = $1
             ORDER BY rating_count DESC, rating DESC, id
             LIMIT $2"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(STATUS_APPROVED)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recently released approved manga.
    pub async fn new_releases(pool: &PgPool, limit: i64) -> Result<Vec<Manga>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga
             WHERE moderation_status = $1
             ORDER BY release_date DESC, id
             LIMIT $2"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(STATUS_APPROVED)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over one column of approved manga.
    pub async fn search(
        pool: &PgPool,
        field: SearchField,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Manga>, sqlx::Error> {
        let column = field.column();
        let query = format!(
            "SELECT {COLUMNS} FROM manga
             WHERE moderation_status = $1 AND {column} ILIKE $2
             ORDER BY rating_count DESC, id
             LIMIT $3"
        );
        let pattern = format!("%{}%", escape_like(term));
        sqlx::query_as::<_, Manga>(&query)
            .bind(STATUS_APPROVED)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Record a moderation decision. Returns `None` if the manga does not
    /// exist.
    pub async fn set_moderation(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!(
            "UPDATE manga SET moderation_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Manga awaiting a moderation decision, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Manga>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga WHERE moderation_status = 'pending' ORDER BY id"
        );
        sqlx::query_as::<_, Manga>(&query).fetch_all(pool).await
    }

    /// Set the cover image path. Returns `true` if the row was updated.
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        image_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE manga SET cover_image = $2 WHERE id = $1")
            .bind(id)
            .bind(image_path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `%` and `_` so user input matches literally inside a LIKE pattern.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
