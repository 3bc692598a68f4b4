//! Repository for the `categories` table and the `manga_categories` join
//! table.

use mangalib_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::category::Category;

/// Provides operations for categories and manga-category associations.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// Duplicate names violate `uq_categories_name` and surface as a
    /// database error, which the API layer maps to 409.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// List all categories alphabetically.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Resolve category names to rows. The result may be shorter than the
    /// input when some names are unknown; callers decide whether that is an
    /// error.
    pub async fn find_by_names(
        pool: &PgPool,
        names: &[String],
    ) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(pool)
            .await
    }

    /// Replace the category set of a manga inside an open transaction.
    pub async fn set_for_manga(
        tx: &mut Transaction<'_, Postgres>,
        manga_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM manga_categories WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut **tx)
            .await?;

        for category_id in category_ids {
            sqlx::query("INSERT INTO manga_categories (manga_id, category_id) VALUES ($1, $2)")
                .bind(manga_id)
                .bind(category_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Category names for a single manga, alphabetically.
    pub async fn names_for_manga(pool: &PgPool, manga_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT c.name FROM categories c
             JOIN manga_categories mc ON mc.category_id = c.id
             WHERE mc.manga_id = $1
             ORDER BY c.name",
        )
        .bind(manga_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Category names for a batch of manga, as `(manga_id, name)` pairs.
    ///
    /// Used by list endpoints to avoid one query per row.
    pub async fn names_for_many(
        pool: &PgPool,
        manga_ids: &[DbId],
    ) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT mc.manga_id, c.name FROM categories c
             JOIN manga_categories mc ON mc.category_id = c.id
             WHERE mc.manga_id = ANY($1)
             ORDER BY mc.manga_id, c.name",
        )
        .bind(manga_ids)
        .fetch_all(pool)
        .await
    }
}
