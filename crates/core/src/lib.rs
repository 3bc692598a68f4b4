//! Domain rules shared by the database and API layers.
//!
//! Pure logic only: constants, validation helpers, and error/type aliases.
//! Nothing in this crate touches the network or the database.

pub mod catalog;
pub mod error;
pub mod manga;
pub mod moderation;
pub mod pages;
pub mod person;
pub mod review;
pub mod roles;
pub mod types;
pub mod users;
