//! Well-known role name constants.
//!
//! Roles are derived from the `users.is_admin` flag rather than a separate
//! roles table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Resolve the role name for a user's admin flag.
pub fn role_name(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}
