//! Media file storage under the configured `MEDIA_ROOT`.
//!
//! Paths stored in the database are always relative to the media root; the
//! `/media` static route serves them back out.

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Write bytes to `{root}/{relative}`, creating parent directories.
pub async fn write_media(root: &Path, relative: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;
    }
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write media file: {e}")))?;
    Ok(path)
}

/// Public URL for a media-relative path.
pub fn media_url(relative: &str) -> String {
    format!("/media/{relative}")
}

/// Guess a Content-Type from a stored file's extension.
pub fn content_type_for(relative: &str) -> &'static str {
    match relative.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
