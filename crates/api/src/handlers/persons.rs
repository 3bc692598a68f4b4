//! Handlers for the `/persons` resource (authors, publishers, artists).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::error::CoreError;
use mangalib_core::moderation::STATUS_APPROVED;
use mangalib_core::person::{
    validate_about, validate_country, validate_kind, validate_nickname,
};
use mangalib_core::types::DbId;
use mangalib_db::models::person::{CreatePerson, Person, PersonListParams};
use mangalib_db::repositories::PersonRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/persons
///
/// Create a person entry. Enters moderation as `pending`.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    validate_nickname(&input.nickname).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_country(&input.country).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_kind(&input.kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_about(&input.about).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let person = PersonRepo::create(&state.pool, &input, auth.user_id).await?;

    tracing::info!(person_id = person.id, user_id = auth.user_id, "Person created");

    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /api/v1/persons
///
/// Approved persons, optionally filtered by kind and nickname substring.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(kind) = &params.kind {
        validate_kind(kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let persons = PersonRepo::list_approved(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: persons }))
}

/// GET /api/v1/persons/{id}
///
/// Detail view, subject to the same visibility rule as manga.
pub async fn get(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
) -> AppResult<Json<Person>> {
    let person = PersonRepo::find_by_id(&state.pool, person_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id: person_id,
        }))?;

    if person.moderation_status != STATUS_APPROVED {
        let allowed =
            user.is_some_and(|u| u.is_admin() || person.created_by == Some(u.user_id));
        if !allowed {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Person",
                id: person_id,
            }));
        }
    }

    Ok(Json(person))
}
