//! Integration tests for Fairway.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p fairway-cli -- migrate
//!
//! # Start the API server
//! cargo run -p fairway-api
//!
//! # Run integration tests (ignored by default)
//! cargo test -p fairway-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP and, where they assert on
//! persistence side effects (deletion log), directly to `PostgreSQL`.
//!
//! # Environment
//!
//! - `FAIRWAY_API_BASE_URL` - API base URL (default: `http://localhost:4000`)
//! - `FAIRWAY_DATABASE_URL` - Needed only by tests that inspect the database

use serde_json::Value;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("FAIRWAY_API_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// Create an HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique throwaway email for one test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@integration.test", uuid::Uuid::new_v4())
}

/// Run the magic-link flow end to end and return a bearer token.
///
/// Works without SMTP because the magic link is also returned in the
/// response body.
///
/// # Panics
///
/// Panics if any auth request fails or the responses lack the expected
/// envelope fields.
pub async fn sign_in(client: &reqwest::Client, email: &str) -> String {
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/auth/requestMagicLink"))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .expect("Failed to request magic link");
    assert!(resp.status().is_success());

    let body: Value = resp.json().await.expect("Failed to read response");
    let link = body["data"]["magicLink"]
        .as_str()
        .expect("magicLink missing");
    let token = link
        .split("token=")
        .nth(1)
        .expect("token missing from magic link");

    let resp = client
        .post(format!("{base_url}/auth/verify?token={token}"))
        .send()
        .await
        .expect("Failed to verify magic link");
    assert!(resp.status().is_success());

    let body: Value = resp.json().await.expect("Failed to read response");
    body["data"]["token"]
        .as_str()
        .expect("bearer token missing")
        .to_string()
}
