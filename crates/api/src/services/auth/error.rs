//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Magic-link token is unknown, expired, or already consumed.
    /// Deliberately one variant: the client cannot tell which.
    #[error("invalid or expired login token")]
    InvalidLoginToken,

    /// Email/password login failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The supplied email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] fairway_core::EmailError),

    /// Bearer token is malformed, tampered with, or expired.
    #[error("invalid bearer token")]
    InvalidBearerToken,

    /// Token signing failed (bad HMAC key material).
    #[error("token signing error: {0}")]
    Signing(String),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
