//! Authentication route handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::response::Envelope;
use crate::services::auth::{AuthService, AuthenticatedUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestMagicLinkBody {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `POST /auth/requestMagicLink`
///
/// Finds or creates the account and emails a single-use sign-in link. The
/// link is also returned in the body; an email send failure downgrades to
/// a warning so development environments work without SMTP.
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(body): Json<RequestMagicLinkBody>,
) -> Result<Response> {
    let email = body
        .email
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;

    let service = AuthService::new(state.pool(), state.signer(), &state.config().client_base_url);
    let link = service.request_magic_link(email).await?;

    if let Some(mailer) = state.email() {
        if let Err(error) = mailer.send_magic_link(link.email.as_str(), &link.url).await {
            tracing::warn!(
                email = %link.email,
                error = %error,
                "failed to send magic-link email"
            );
        }
    } else {
        tracing::info!(email = %link.email, link = %link.url, "email disabled, magic link logged");
    }

    Ok(Envelope::ok("Magic link generated", json!({ "magicLink": link.url })).into_response())
}

/// `POST /auth/verify?token=...`
///
/// Consumes the magic-link token and issues a bearer token.
pub async fn verify(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Response> {
    let token = query
        .token
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Token is required".to_string()))?;

    let service = AuthService::new(state.pool(), state.signer(), &state.config().client_base_url);
    let authenticated = service.verify_magic_link(token).await?;

    Ok(Envelope::ok("Signed in successfully", session_payload(&authenticated)).into_response())
}

/// `POST /auth/login`
///
/// Password login for accounts provisioned with one.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Response> {
    let email = body
        .email
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;
    let password = body
        .password
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Password is required".to_string()))?;

    let service = AuthService::new(state.pool(), state.signer(), &state.config().client_base_url);
    let authenticated = service.login_with_password(email, password).await?;

    Ok(Envelope::ok("Signed in successfully", session_payload(&authenticated)).into_response())
}

fn session_payload(authenticated: &AuthenticatedUser) -> serde_json::Value {
    json!({
        "token": authenticated.token,
        "user": {
            "id": authenticated.user.id,
            "email": authenticated.user.email,
        },
    })
}
