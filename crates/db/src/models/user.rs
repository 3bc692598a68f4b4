//! User entity model and DTOs.

use mangalib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub about: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub about: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            about: user.about,
            profile_image: user.profile_image,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub about: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    /// Plaintext password; re-hashed by the handler before it reaches the
    /// repository as part of [`UserChanges`].
    pub password: Option<String>,
}

/// Resolved column changes applied by `UserRepo::update`.
///
/// Unlike [`UpdateUser`] this carries the already-hashed password.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub password_hash: Option<String>,
}
