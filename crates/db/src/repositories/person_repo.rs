//! Repository for the `persons` table.

use mangalib_core::catalog::{clamp_limit, clamp_offset};
use mangalib_core::moderation::STATUS_APPROVED;
use mangalib_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, PersonListParams};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nickname, country, kind, about, profile_image, moderation_status, \
                       created_by, created_at";

/// Provides CRUD and moderation operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a person, returning the created row. New entries always start
    /// in the `pending` moderation state.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePerson,
        created_by: DbId,
    ) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (nickname, country, kind, about, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.nickname)
            .bind(&input.country)
            .bind(&input.kind)
            .bind(&input.about)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID regardless of moderation state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List approved persons, optionally filtered by kind and nickname
    /// substring, alphabetically.
    pub async fn list_approved(
        pool: &PgPool,
        params: &PersonListParams,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);
        let pattern = params.q.as_ref().map(|q| format!("%{q}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM persons
             WHERE moderation_status = $1
               AND ($2::varchar IS NULL OR kind = $2)
               AND ($3::varchar IS NULL OR nickname ILIKE $3)
             ORDER BY nickname, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(STATUS_APPROVED)
            .bind(&params.kind)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Record a moderation decision. Returns `None` if the person does not
    /// exist.
    pub async fn set_moderation(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET moderation_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Persons awaiting a moderation decision, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persons WHERE moderation_status = 'pending' ORDER BY id"
        );
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }
}
