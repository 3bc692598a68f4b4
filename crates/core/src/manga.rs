//! Manga publication status constants and field validation.

/// Maximum length of a manga title.
pub const MAX_TITLE_LEN: usize = 128;

/// Maximum length of the author / artist credit fields.
pub const MAX_CREDIT_LEN: usize = 64;

/// Chapters are being released.
pub const STATUS_ONGOING: &str = "ongoing";

/// The series has finished.
pub const STATUS_COMPLETED: &str = "completed";

/// Announced but not yet released.
pub const STATUS_ANNOUNCED: &str = "announced";

/// Release is on hiatus.
pub const STATUS_PAUSED: &str = "paused";

/// Release was cancelled before completion.
pub const STATUS_DISCONTINUED: &str = "discontinued";

/// All valid publication statuses.
pub const PUBLICATION_STATUSES: &[&str] = &[
    STATUS_ONGOING,
    STATUS_COMPLETED,
    STATUS_ANNOUNCED,
    STATUS_PAUSED,
    STATUS_DISCONTINUED,
];

/// Validate that a publication status is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if PUBLICATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            PUBLICATION_STATUSES.join(", ")
        ))
    }
}

/// Validate a manga title: non-empty and within the length limit.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

/// Validate an author or artist credit: non-empty and within the length limit.
pub fn validate_credit(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().count() > MAX_CREDIT_LEN {
        return Err(format!("{field} must be at most {MAX_CREDIT_LEN} characters"));
    }
    Ok(())
}
