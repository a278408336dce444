//! Club catalogue route handlers.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::booqable::types::RentalDate;
use crate::catalogue::{self, ClubQuery, availability};
use crate::error::{ApiError, Result};
use crate::response::Envelope;
use crate::state::AppState;

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub course: Option<String>,
    pub date: Option<String>,
}

/// `GET /clubs`
///
/// Filtered, sorted, paginated catalogue listing.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ClubQuery>,
) -> Result<Response> {
    let page = catalogue::list_clubs(state.booqable(), &query)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;

    Ok(Envelope::ok("Clubs fetched successfully", page).into_response())
}

/// `GET /clubs/available?course&date`
///
/// Clubs available at a course, optionally on a specific date. The date is
/// shape-checked only (three dash-separated numeric parts); calendar
/// validity is upstream's concern.
pub async fn available(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Response> {
    let course = query
        .course
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Course is required".to_string()))?;

    let date = query
        .date
        .as_deref()
        .map(|raw| {
            RentalDate::parse(raw).ok_or_else(|| {
                ApiError::BadRequest("Invalid date format. Expected YYYY-MM-DD".to_string())
            })
        })
        .transpose()?;

    let clubs = availability::available_clubs(state.booqable(), course, date)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;

    Ok(Envelope::ok("Available clubs fetched successfully", clubs).into_response())
}

/// `GET /clubs/{id}`
///
/// A single club, or the not-found envelope (HTTP 200) when the ID does
/// not exist upstream.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let ids = [id];
    let mut clubs = catalogue::lookup_by_ids(state.booqable(), &ids)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;

    Ok(match clubs.pop() {
        Some(club) => Envelope::ok("Club fetched successfully", club).into_response(),
        None => Envelope::not_found_ok("Club not found").into_response(),
    })
}
