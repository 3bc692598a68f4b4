//! Review rating bounds and text validation.

/// Lowest allowed rating.
pub const RATING_MIN: f64 = 0.0;

/// Highest allowed rating.
pub const RATING_MAX: f64 = 10.0;

/// Maximum length of a review body.
pub const MAX_TEXT_LEN: usize = 1000;

/// Validate that a rating falls within the 0..=10 scale.
pub fn validate_rating(rating: f64) -> Result<(), String> {
    if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}"
        ));
    }
    Ok(())
}

/// Validate a review body: non-empty and within the length limit.
pub fn validate_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Review text must not be empty".to_string());
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(format!(
            "Review text must be at most {MAX_TEXT_LEN} characters"
        ));
    }
    Ok(())
}
