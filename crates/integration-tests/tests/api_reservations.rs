//! Integration tests for reservations, including the saveToBag dual write.
//!
//! These tests require:
//! - A running API server (cargo run -p fairway-api)
//! - Valid Booqable credentials in its environment
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use fairway_integration_tests::{api_base_url, client, sign_in, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_reservation_requires_course_date_and_clubs() {
    let client = client();
    let base_url = api_base_url();
    let token = sign_in(&client, &unique_email("resv-validation")).await;

    for body in [
        json!({ "date": "2025-09-01", "clubs": ["p1"] }),
        json!({ "course": "Pebble", "clubs": ["p1"] }),
        json!({ "course": "Pebble", "date": "2025-09-01" }),
        json!({ "course": "Pebble", "date": "2025-09-01", "clubs": [] }),
    ] {
        let resp = client
            .post(format!("{base_url}/reservations"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .expect("Failed to create reservation");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
#[ignore = "Requires running API server and Booqable credentials"]
async fn test_reservation_with_save_to_bag_creates_favourite() {
    let client = client();
    let base_url = api_base_url();
    let token = sign_in(&client, &unique_email("resv-bag")).await;

    let resp = client
        .post(format!("{base_url}/reservations"))
        .bearer_auth(&token)
        .json(&json!({
            "course": "Pebble Creek",
            "date": "2025-09-01",
            "clubs": ["p1", "p2"],
            "saveToBag": true,
        }))
        .send()
        .await
        .expect("Failed to create reservation");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["data"]["status"], "confirmed");
    let bag_id = body["data"]["savedAsBag"].as_i64().expect("savedAsBag");

    // The bag exists and carries the derived name
    let body: Value = client
        .get(format!("{base_url}/favourites/{bag_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch bag")
        .json()
        .await
        .expect("Failed to read response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["setName"], "Pebble Creek - 2025-09-01");

    // The reservation shows up in the list, newest date first
    let body: Value = client
        .get(format!("{base_url}/reservations"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list reservations")
        .json()
        .await
        .expect("Failed to read response");
    let reservations = body["data"].as_array().expect("reservations");
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0]["course"], "Pebble Creek");
}
