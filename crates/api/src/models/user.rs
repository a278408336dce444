//! User domain type.

use chrono::{DateTime, Utc};

use fairway_core::{Email, UserId};

/// A Fairway user.
///
/// Created implicitly on the first magic-link request for an email address.
/// The password hash is optional: most users only ever log in via magic
/// link.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (stored normalized).
    pub email: Email,
    /// Whether the email has been verified via a magic link.
    pub verified: bool,
    /// Argon2 hash, present only when the user set a password.
    pub password_hash: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
