//! Person (author / publisher / artist) constants and validation.

/// Maximum length of a person's nickname.
pub const MAX_NICKNAME_LEN: usize = 128;

/// Maximum length of the country field.
pub const MAX_COUNTRY_LEN: usize = 32;

/// Maximum length of the about text.
pub const MAX_ABOUT_LEN: usize = 500;

pub const KIND_AUTHOR: &str = "author";
pub const KIND_PUBLISHER: &str = "publisher";
pub const KIND_ARTIST: &str = "artist";

/// All valid person kinds.
pub const VALID_KINDS: &[&str] = &[KIND_AUTHOR, KIND_PUBLISHER, KIND_ARTIST];

/// Validate that a person kind is one of the accepted values.
pub fn validate_kind(kind: &str) -> Result<(), String> {
    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(format!(
            "Invalid kind '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        ))
    }
}

/// Validate a person's nickname: non-empty and within the length limit.
pub fn validate_nickname(nickname: &str) -> Result<(), String> {
    if nickname.trim().is_empty() {
        return Err("Nickname must not be empty".to_string());
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err(format!(
            "Nickname must be at most {MAX_NICKNAME_LEN} characters"
        ));
    }
    Ok(())
}

/// Validate the country field length.
pub fn validate_country(country: &str) -> Result<(), String> {
    if country.chars().count() > MAX_COUNTRY_LEN {
        return Err(format!(
            "Country must be at most {MAX_COUNTRY_LEN} characters"
        ));
    }
    Ok(())
}

/// Validate the about text length.
pub fn validate_about(about: &str) -> Result<(), String> {
    if about.chars().count() > MAX_ABOUT_LEN {
        return Err(format!("About must be at most {MAX_ABOUT_LEN} characters"));
    }
    Ok(())
}
