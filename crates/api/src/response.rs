//! Uniform response envelope.
//!
//! Every handler responds with the same JSON shape the SPA was built
//! against:
//!
//! ```json
//! {"success": true, "status": "success", "message": "...", "data": {...}, "statusCode": 200}
//! ```
//!
//! One quirk is load-bearing: a lookup for a favourite or reservation the
//! user does not own answers HTTP 200 with `success: false` and `data: null`
//! instead of 404. The client treats that as an empty state, not an error,
//! so [`Envelope::not_found_ok`] exists as a first-class constructor.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope status field: `"success"` or `"failure"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Failure,
}

/// The uniform response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub status: EnvelopeStatus,
    pub message: String,
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T: Serialize> Envelope<T> {
    /// 200 success with payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success_with_code(StatusCode::OK, message, data)
    }

    /// 201 success with payload.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success_with_code(StatusCode::CREATED, message, data)
    }

    /// Success envelope with an explicit status code.
    pub fn success_with_code(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
            status_code: code.as_u16(),
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Failure envelope carried on a real error status (400/401/5xx).
    pub fn failure(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: EnvelopeStatus::Failure,
            message: message.into(),
            data: None,
            status_code: code.as_u16(),
        }
    }

    /// The deliberate not-found contract: HTTP 200, `success: false`,
    /// `data: null`. Kept for SPA compatibility; do not "fix" to 404.
    pub fn not_found_ok(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: EnvelopeStatus::Failure,
            message: message.into(),
            data: None,
            status_code: StatusCode::OK.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let envelope = Envelope::ok("Clubs fetched", vec!["p1", "p2"]);
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Clubs fetched");
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["data"][0], "p1");
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = Envelope::failure(StatusCode::BAD_REQUEST, "setName is required");
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "failure");
        assert_eq!(json["statusCode"], 400);
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_not_found_ok_is_http_200() {
        let envelope = Envelope::not_found_ok("Favourite set not found");
        assert_eq!(envelope.status_code, 200);
        assert!(!envelope.success);
        assert!(envelope.data.is_none());

        let response = envelope.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_into_response_uses_status_code() {
        let response = Envelope::failure(StatusCode::UNAUTHORIZED, "nope").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
