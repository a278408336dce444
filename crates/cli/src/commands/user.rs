//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! fairway-cli user set-password -e golfer@example.com -p 'a-long-password'
//! ```
//!
//! # Environment Variables
//!
//! - `FAIRWAY_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use fairway_core::Email;

/// Minimum password length accepted by the CLI.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] fairway_core::EmailError),

    /// Password too short.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Hashing failed.
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Set a password for a user, creating the account if it does not exist.
///
/// # Errors
///
/// Returns an error for an unparseable email, a too-short password, or a
/// database failure.
pub async fn set_password(email: &str, password: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserError::WeakPassword);
    }

    let database_url = std::env::var("FAIRWAY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| UserError::MissingEnvVar("FAIRWAY_DATABASE_URL"))?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::Hash(e.to_string()))?
        .to_string();

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    sqlx::query(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = now()",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .execute(&pool)
    .await?;

    tracing::info!("Password set for {}", email);
    Ok(())
}
