//! Handlers for bulk chapter upload and page reading.
//!
//! A chapter arrives as one ZIP archive of page images plus multipart fields
//! naming the volume/chapter. Entries are ordered naturally (numeric-aware,
//! so `page2` precedes `page10`) and numbered 1..N; re-uploading a chapter
//! replaces its pages.

use std::io::Read;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mangalib_core::pages::{
    chapter_dir, page_extension, page_file_name, sort_pages, SUPPORTED_PAGE_EXTENSIONS,
};
use mangalib_core::types::DbId;
use mangalib_db::models::manga_page::{ChapterSummary, NewPage};
use mangalib_db::repositories::MangaPageRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::manga::{ensure_owner_or_admin, find_by_id, find_visible};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

/// Response body for a successful chapter upload.
#[derive(Debug, Serialize)]
pub struct ChapterUploaded {
    pub volume: i32,
    pub chapter: i32,
    pub pages: usize,
}

/// One volume in the volumes listing, with its chapters in order.
#[derive(Debug, Serialize)]
pub struct VolumeGroup {
    pub volume: i32,
    pub chapters: Vec<ChapterEntry>,
}

/// One chapter inside a [`VolumeGroup`].
#[derive(Debug, Serialize)]
pub struct ChapterEntry {
    pub chapter: i32,
    pub chapter_title: String,
    pub pages: i64,
}

/// One page in the reader payload.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page_number: i32,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Reader payload for one chapter.
#[derive(Debug, Serialize)]
pub struct ChapterPages {
    pub volume: i32,
    pub chapter: i32,
    pub chapter_title: String,
    pub pages: Vec<PageView>,
}

/// Query parameters for `GET /manga/{id}/pages`.
#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    pub volume: Option<i32>,
    pub chapter: Option<i32>,
}

/// POST /api/v1/manga/{id}/chapters
///
/// Multipart fields: `volume`, `chapter`, optional `chapter_title`, and
/// `file` (the ZIP archive). Creator or admin only.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ChapterUploaded>)> {
    let manga = find_by_id(&state.pool, manga_id).await?;
    ensure_owner_or_admin(&manga, &auth)?;

    let mut volume: Option<i32> = None;
    let mut chapter: Option<i32> = None;
    let mut chapter_title = String::new();
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "volume" => volume = Some(parse_positive(&field_text(field).await?, "volume")?),
            "chapter" => chapter = Some(parse_positive(&field_text(field).await?, "chapter")?),
            "chapter_title" => chapter_title = field_text(field).await?,
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some(data.to_vec());
            }
            _ => {} // ignore unknown fields
        }
    }

    let volume = volume.ok_or_else(|| AppError::BadRequest("Missing 'volume' field".into()))?;
    let chapter = chapter.ok_or_else(|| AppError::BadRequest("Missing 'chapter' field".into()))?;
    let data =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if chapter_title.chars().count() > 128 {
        return Err(AppError::BadRequest(
            "chapter_title must be at most 128 characters".into(),
        ));
    }

    let entries = unpack_archive(&data)?;

    // Write pages to the media root, then swap the chapter rows in one
    // transaction.
    let dir = chapter_dir(manga_id, volume, chapter);
    let mut new_pages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let page_number = (index + 1) as i32;
        let relative = format!("{dir}/{}", page_file_name(page_number, &entry.extension));
        storage::write_media(&state.config.media_root, &relative, &entry.bytes).await?;

        new_pages.push(NewPage {
            page_number,
            image_path: relative,
            width: entry.width,
            height: entry.height,
        });
    }

    let stored = MangaPageRepo::replace_chapter(
        &state.pool,
        manga_id,
        volume,
        chapter,
        &chapter_title,
        &new_pages,
    )
    .await?;

    tracing::info!(
        manga_id,
        volume,
        chapter,
        pages = stored,
        user_id = auth.user_id,
        "Chapter uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ChapterUploaded {
            volume,
            chapter,
            pages: stored,
        }),
    ))
}

/// GET /api/v1/manga/{id}/volumes
///
/// Chapters grouped by volume, in reading order.
pub async fn volumes(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_visible(&state.pool, manga_id, user.as_ref()).await?;

    let summaries = MangaPageRepo::chapter_summaries(&state.pool, manga_id).await?;
    Ok(Json(DataResponse {
        data: group_volumes(summaries),
    }))
}

/// GET /api/v1/manga/{id}/pages?volume=&chapter=
///
/// The pages of one chapter with public image URLs, in reading order.
pub async fn pages(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Path(manga_id): Path<DbId>,
    Query(query): Query<PagesQuery>,
) -> AppResult<Json<ChapterPages>> {
    find_visible(&state.pool, manga_id, user.as_ref()).await?;

    let volume = query
        .volume
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter 'volume'".into()))?;
    let chapter = query
        .chapter
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter 'chapter'".into()))?;

    let rows = MangaPageRepo::pages_for_chapter(&state.pool, manga_id, volume, chapter).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(format!(
            "No pages for manga {manga_id} volume {volume} chapter {chapter}"
        )));
    }

    let chapter_title = rows[0].chapter_title.clone();
    let pages = rows
        .into_iter()
        .map(|p| PageView {
            page_number: p.page_number,
            url: storage::media_url(&p.image_path),
            width: p.width,
            height: p.height,
        })
        .collect();

    Ok(Json(ChapterPages {
        volume,
        chapter,
        chapter_title,
        pages,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One decoded page from the uploaded archive.
struct ArchivePage {
    extension: String,
    bytes: Vec<u8>,
    width: Option<i32>,
    height: Option<i32>,
}

/// Decode the archive and return its image entries in reading order.
fn unpack_archive(data: &[u8]) -> AppResult<Vec<ArchivePage>> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| AppError::BadRequest(format!("Not a valid ZIP archive: {e}")))?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| page_extension(name).is_some())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Archive contains no page images. Supported extensions: {}",
            SUPPORTED_PAGE_EXTENSIONS.join(", ")
        )));
    }

    sort_pages(&mut names);

    let mut entries = Vec::with_capacity(names.len());
    for name in &names {
        let Some(extension) = page_extension(name) else {
            continue; // names were filtered above
        };

        let mut file = archive
            .by_name(name)
            .map_err(|e| AppError::BadRequest(format!("Corrupt archive entry '{name}': {e}")))?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)
            .map_err(|e| AppError::BadRequest(format!("Corrupt archive entry '{name}': {e}")))?;

        // Header-only dimension read; pages without parseable headers are
        // stored without dimensions rather than rejected.
        let dimensions = image::ImageReader::new(std::io::Cursor::new(&bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        entries.push(ArchivePage {
            extension,
            bytes,
            width: dimensions.map(|(w, _)| w as i32),
            height: dimensions.map(|(_, h)| h as i32),
        });
    }

    Ok(entries)
}

/// Group per-chapter summaries into per-volume buckets, preserving order.
fn group_volumes(summaries: Vec<ChapterSummary>) -> Vec<VolumeGroup> {
    let mut groups: Vec<VolumeGroup> = Vec::new();
    for summary in summaries {
        let entry = ChapterEntry {
            chapter: summary.chapter,
            chapter_title: summary.chapter_title,
            pages: summary.pages,
        };
        match groups.last_mut() {
            Some(group) if group.volume == summary.volume => group.chapters.push(entry),
            _ => groups.push(VolumeGroup {
                volume: summary.volume,
                chapters: vec![entry],
            }),
        }
    }
    groups
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_positive(value: &str, field: &str) -> AppResult<i32> {
    let parsed: i32 = value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{field}' must be an integer")))?;
    if parsed < 1 {
        return Err(AppError::BadRequest(format!("'{field}' must be >= 1")));
    }
    Ok(parsed)
}
