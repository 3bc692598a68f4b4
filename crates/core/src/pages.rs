//! Chapter page naming rules: extension allowlist, natural ordering of
//! archive entries, and media path construction.

use std::cmp::Ordering;

use crate::types::DbId;

/// Image extensions accepted inside a chapter archive.
pub const SUPPORTED_PAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Extract the lowercased extension of an archive entry, if supported.
///
/// Returns `None` for directories, hidden files, macOS resource forks, and
/// entries without a supported image extension.
pub fn page_extension(entry_name: &str) -> Option<String> {
    if entry_name.ends_with('/') {
        return None;
    }
    let file_name = entry_name.rsplit('/').next()?;
    if file_name.starts_with('.') || entry_name.starts_with("__MACOSX") {
        return None;
    }
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    if SUPPORTED_PAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

/// Numeric-aware comparison of two entry names, so `page2` sorts before
/// `page10`. Digit runs compare as integers, everything else byte-wise.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ia = a.chars().peekable();
    let mut ib = b.chars().peekable();

    loop {
        match (ia.peek().copied(), ib.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let na = take_number(&mut ia);
                    let nb = take_number(&mut ib);
                    match na.cmp(&nb) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                match ca.cmp(&cb) {
                    Ordering::Equal => {
                        ia.next();
                        ib.next();
                    }
                    other => return other,
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek() {
        match c.to_digit(10) {
            Some(d) => {
                value = value.saturating_mul(10).saturating_add(u64::from(d));
                chars.next();
            }
            None => break,
        }
    }
    value
}

/// Sort archive entry names into reading order.
pub fn sort_pages(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}

/// Relative media directory for a chapter's pages.
pub fn chapter_dir(manga_id: DbId, volume: i32, chapter: i32) -> String {
    format!("manga/{manga_id}/v{volume}/c{chapter}")
}

/// Stored file name for a page, zero-padded so lexical order matches reading
/// order on disk.
pub fn page_file_name(page_number: i32, extension: &str) -> String {
    format!("{page_number:03}.{extension}")
}
