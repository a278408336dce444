//! Bearer-token authentication extractor.
//!
//! Favourites and reservations handlers take a [`CurrentUser`] parameter;
//! extraction fails with a 401 envelope when the `Authorization` header is
//! missing, malformed, or carries a token that fails signature or expiry
//! verification.

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

use fairway_core::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user, extracted from the `Authorization` header.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     user: CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".to_string()))?;

        let claims = state
            .signer()
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(Self {
            id: UserId::new(claims.sub),
            email: claims.email,
        })
    }
}
