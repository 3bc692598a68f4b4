//! Handlers for the moderation workflow.
//!
//! Admins decide pending manga and person entries. Decisions may be
//! re-applied, so a rejected entry can later be approved without a
//! re-submission round-trip.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::error::CoreError;
use mangalib_core::moderation::validate_decision;
use mangalib_core::types::DbId;
use mangalib_db::repositories::{MangaRepo, PersonRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::manga::with_categories;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the decision endpoints.
#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    /// `approved` or `rejected`.
    pub decision: String,
}

/// POST /api/v1/manga/{id}/moderation
///
/// Record an admin decision on a manga entry.
pub async fn moderate_manga(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    Json(input): Json<ModerationRequest>,
) -> AppResult<impl IntoResponse> {
    validate_decision(&input.decision).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let manga = MangaRepo::set_moderation(&state.pool, manga_id, &input.decision)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: manga_id,
        }))?;

    tracing::info!(
        manga_id,
        user_id = admin.user_id,
        decision = %input.decision,
        "Manga moderated"
    );

    Ok(Json(manga))
}

/// POST /api/v1/persons/{id}/moderation
///
/// Record an admin decision on a person entry.
pub async fn moderate_person(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
    Json(input): Json<ModerationRequest>,
) -> AppResult<impl IntoResponse> {
    validate_decision(&input.decision).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let person = PersonRepo::set_moderation(&state.pool, person_id, &input.decision)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id: person_id,
        }))?;

    tracing::info!(
        person_id,
        user_id = admin.user_id,
        decision = %input.decision,
        "Person moderated"
    );

    Ok(Json(person))
}

/// GET /api/v1/moderation/manga
///
/// Manga awaiting a decision, oldest first. Admin only.
pub async fn pending_manga(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let manga = MangaRepo::list_pending(&state.pool).await?;
    let items = with_categories(&state.pool, manga).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/moderation/persons
///
/// Persons awaiting a decision, oldest first. Admin only.
pub async fn pending_persons(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let persons = PersonRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: persons }))
}
