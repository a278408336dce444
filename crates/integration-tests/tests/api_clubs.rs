//! Integration tests for the public catalogue endpoints.
//!
//! These tests require:
//! - A running API server (cargo run -p fairway-api)
//! - Valid Booqable credentials in its environment
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use fairway_integration_tests::{api_base_url, client};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_club_list_envelope_and_pagination() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/clubs?page=1&limit=5"))
        .send()
        .await
        .expect("Failed to list clubs");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "success");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["limit"], 5);
    assert!(body["data"]["clubs"].as_array().expect("clubs array").len() <= 5);
    assert!(body["data"]["total"].is_u64());
    assert!(body["data"]["totalPages"].is_u64());
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_club_list_archived_filter_algebra() {
    let client = client();
    let base_url = api_base_url();

    async fn total(client: &reqwest::Client, url: String) -> u64 {
        let body: Value = client
            .get(url)
            .send()
            .await
            .expect("Failed to list clubs")
            .json()
            .await
            .expect("Failed to read response");
        body["data"]["total"].as_u64().expect("total")
    }

    let active = total(&client, format!("{base_url}/clubs")).await;
    let archived = total(&client, format!("{base_url}/clubs?archived=true")).await;
    let all = total(&client, format!("{base_url}/clubs?archived=all")).await;

    assert_eq!(all, active + archived);
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_unknown_club_id_is_not_found_in_body() {
    let client = client();
    let base_url = api_base_url();

    let resp = client
        .get(format!("{base_url}/clubs/does-not-exist"))
        .send()
        .await
        .expect("Failed to fetch club");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_available_requires_course_and_well_formed_date() {
    let client = client();
    let base_url = api_base_url();

    // Missing course
    let resp = client
        .get(format!("{base_url}/clubs/available"))
        .send()
        .await
        .expect("Failed to call available");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Two-part date is rejected
    let resp = client
        .get(format!("{base_url}/clubs/available?course=Pebble&date=2025-07"))
        .send()
        .await
        .expect("Failed to call available");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Month 13 is shape-valid and forwarded upstream
    let resp = client
        .get(format!(
            "{base_url}/clubs/available?course=Pebble&date=2025-13-40"
        ))
        .send()
        .await
        .expect("Failed to call available");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_course_only_mode_never_reports_unavailable() {
    let client = client();
    let base_url = api_base_url();

    let body: Value = client
        .get(format!("{base_url}/clubs/available?course=Pebble"))
        .send()
        .await
        .expect("Failed to call available")
        .json()
        .await
        .expect("Failed to read response");

    for club in body["data"].as_array().expect("clubs array") {
        assert_eq!(club["available"], true);
        assert!(club["unavailabilityReason"].is_null());
    }
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_courses_and_available_dates() {
    let client = client();
    let base_url = api_base_url();

    let body: Value = client
        .get(format!("{base_url}/courses"))
        .send()
        .await
        .expect("Failed to list courses")
        .json()
        .await
        .expect("Failed to read response");
    let courses = body["data"].as_array().expect("courses array");

    if let Some(course) = courses.first() {
        let id = course["id"].as_str().expect("course id");
        let body: Value = client
            .get(format!(
                "{base_url}/courses/{id}/available-dates?year=2025&month=2"
            ))
            .send()
            .await
            .expect("Failed to fetch dates")
            .json()
            .await
            .expect("Failed to read response");
        assert_eq!(body["data"]["dates"].as_array().expect("dates").len(), 28);
    }
}
