//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<_, ApiError>`; the error renders the
//! same response envelope as success paths. Server-side failures are
//! captured to Sentry and logged with detail, while the client only ever
//! sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::booqable::BooqableError;
use crate::db::RepositoryError;
use crate::response::Envelope;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Booqable call failed on a fatal path (catalogue/location fetch).
    #[error("{message}: {source}")]
    Upstream {
        /// Client-facing message, e.g. "Failed to fetch clubs from Booqable".
        message: String,
        #[source]
        source: BooqableError,
    },

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request lacks valid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap a Booqable failure with the generic message the client sees.
    pub fn upstream(message: impl Into<String>, source: BooqableError) -> Self {
        Self::Upstream {
            message: message.into(),
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Upstream { .. }
        ) || matches!(
            self,
            Self::Auth(AuthError::Repository(_) | AuthError::Signing(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Auth(err) => match err {
                AuthError::InvalidLoginToken | AuthError::InvalidEmail(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::InvalidCredentials | AuthError::InvalidBearerToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Signing(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Server error".to_string(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Auth(err) => match err {
                AuthError::InvalidLoginToken => "Invalid or expired login token".to_string(),
                AuthError::InvalidEmail(_) => "A valid email address is required".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::InvalidBearerToken => "Invalid or expired token".to_string(),
                AuthError::Signing(_) | AuthError::Repository(_) => "Server error".to_string(),
            },
            Self::Unauthorized(message) | Self::BadRequest(message) => message.clone(),
        };

        Envelope::failure(status, message).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
