//! Login-token repository for the magic-link flow.
//!
//! One live token per email (upsert replaces any previous one). Tokens are
//! single-use and expire after 15 minutes. Consumption is a single
//! `DELETE ... RETURNING` guarded on the expiry, so two verification
//! requests racing over the same token cannot both succeed, and an expired
//! token is indistinguishable from an absent one.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use fairway_core::Email;

use super::RepositoryError;

/// How long a magic-link token stays valid.
pub const TOKEN_TTL_MINUTES: i64 = 15;

/// Repository for login-token operations.
pub struct LoginTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LoginTokenRepository<'a> {
    /// Create a new login-token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a fresh token for this email, replacing any existing one.
    ///
    /// Expired rows across all emails are swept opportunistically here, the
    /// Postgres analog of a TTL index: the table stays small without a
    /// background job.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn upsert(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<DateTime<Utc>, RepositoryError> {
        sqlx::query("DELETE FROM login_tokens WHERE expires_at <= now()")
            .execute(self.pool)
            .await?;

        let expires_at = Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES);

        sqlx::query(
            "INSERT INTO login_tokens (email, token, expires_at) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at",
        )
        .bind(email.as_str())
        .bind(token)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(expires_at)
    }

    /// Atomically consume a token, returning the email it was issued for.
    ///
    /// Returns `None` for tokens that are unknown, expired, or already
    /// consumed; the three cases are deliberately indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn consume(&self, token: &str) -> Result<Option<Email>, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as(
            "DELETE FROM login_tokens WHERE token = $1 AND expires_at > now() RETURNING email",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        row.map(|(email,)| {
            Email::parse(&email).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })
        })
        .transpose()
    }
}
