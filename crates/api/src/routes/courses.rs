//! Course (rental location) route handlers.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalogue::availability;
use crate::error::{ApiError, Result};
use crate::response::Envelope;
use crate::state::AppState;

/// A course as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// Query parameters for the available-dates endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailableDatesQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// `GET /courses`
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let locations = state
        .booqable()
        .locations()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch courses from Booqable", e))?;

    let courses: Vec<Course> = locations
        .into_iter()
        .map(|location| Course {
            address: location.display_address(),
            id: location.id,
            name: location.name,
        })
        .collect();

    Ok(Envelope::ok("Courses fetched successfully", courses).into_response())
}

/// `GET /courses/{location_id}/available-dates?year&month`
///
/// Bookable dates for a month. Stock is bulk and has no per-day calendar
/// upstream, so every date of the month is bookable; clients filter past
/// dates themselves.
pub async fn available_dates(
    State(_state): State<AppState>,
    Path(_location_id): Path<String>,
    Query(query): Query<AvailableDatesQuery>,
) -> Result<Response> {
    let year = query
        .year
        .ok_or_else(|| ApiError::BadRequest("Year is required".to_string()))?;
    let month = query
        .month
        .ok_or_else(|| ApiError::BadRequest("Month is required".to_string()))?;

    let dates = availability::month_dates(year, month)
        .ok_or_else(|| ApiError::BadRequest("Invalid year/month".to_string()))?;

    Ok(Envelope::ok("Available dates fetched successfully", json!({ "dates": dates }))
        .into_response())
}
