//! User repository.
//!
//! Queries use the runtime sqlx API with [`sqlx::FromRow`] row structs; the
//! schema they assume is defined by the migrations in
//! `crates/api/migrations/`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fairway_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Raw `users` row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    verified: bool,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            verified: self.verified,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, verified, password_hash, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    /// Get the user for an email, creating the account if it does not exist.
    ///
    /// This is the implicit-signup path of the magic-link flow: requesting a
    /// link for an unknown address creates the account. The upsert makes the
    /// operation race-safe when two requests arrive for the same new email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_or_create(&self, email: &Email) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email) VALUES ($1)
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// Mark the user with this email as verified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `sqlx::Error::RowNotFound` (as `Database`) if no such user exists.
    pub async fn mark_verified(&self, email: &Email) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET verified = TRUE, updated_at = now()
             WHERE email = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }
}
