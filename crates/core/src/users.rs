//! Account field validation (username, email, password, about text).

use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 24;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 48;

/// Maximum length of the profile about text.
pub const MAX_ABOUT_LEN: usize = 500;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Default about text for new accounts.
pub const DEFAULT_ABOUT: &str = "Something about me...";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Validate a username: non-empty, within the length limit, and restricted to
/// word characters, dots, and dashes (usernames appear in URLs).
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username must not be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err("Username may only contain letters, digits, '_', '.', and '-'".to_string());
    }
    Ok(())
}

/// Validate an email address: basic shape check plus the length limit.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(format!("Email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email address".to_string());
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
