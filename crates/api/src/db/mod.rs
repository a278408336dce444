//! Database operations for the Fairway `PostgreSQL` instance.
//!
//! Stores local data only (Booqable is source of truth for the club
//! catalogue, which is never persisted here):
//!
//! ## Tables
//!
//! - `users` - Magic-link authentication accounts
//! - `login_tokens` - Single-use, expiring magic-link tokens
//! - `favourite_sets` - User bags (ordered club-ID references, soft-deleted)
//! - `reservations` - Append-only checkout records
//! - `deletion_log` - Audit snapshots of soft-deleted entities
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p fairway-cli -- migrate
//! ```

pub mod deletion_log;
pub mod favourites;
pub mod login_tokens;
pub mod reservations;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
