//! Reservation route handlers.

use std::collections::HashSet;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fairway_core::{FavouriteSetId, ReservationId, ReservationStatus};

use crate::catalogue::{self, Club};
use crate::db::favourites::FavouriteRepository;
use crate::db::reservations::ReservationRepository;
use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::Reservation;
use crate::response::Envelope;
use crate::routes::club_index;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationBody {
    pub course: Option<String>,
    pub date: Option<String>,
    pub clubs: Option<Vec<String>>,
    #[serde(default)]
    pub save_to_bag: bool,
}

/// A reservation enriched with live catalogue records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: ReservationId,
    pub course: String,
    pub date: String,
    pub club_ids: Vec<String>,
    pub clubs: Vec<Club>,
    pub status: ReservationStatus,
    pub saved_as_bag: Option<FavouriteSetId>,
    pub created_at: DateTime<Utc>,
}

impl ReservationView {
    fn new(reservation: Reservation, catalogue: &std::collections::HashMap<String, Club>) -> Self {
        let clubs = reservation
            .club_ids
            .iter()
            .filter_map(|id| catalogue.get(id).cloned())
            .collect();

        Self {
            id: reservation.id,
            course: reservation.course,
            date: reservation.date,
            club_ids: reservation.club_ids,
            clubs,
            status: reservation.status,
            saved_as_bag: reservation.saved_as_bag,
            created_at: reservation.created_at,
        }
    }
}

/// `POST /reservations`
///
/// Creates a reservation; with `saveToBag` the same clubs are first saved
/// as a favourite set named `"<course> - <date>"`. The two writes are a
/// deliberate two-step saga: if the reservation insert fails after the
/// favourite insert succeeded, the orphan favourite remains.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateReservationBody>,
) -> Result<Response> {
    let course = body
        .course
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Course is required".to_string()))?;
    let date = body
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Date is required".to_string()))?;
    let club_ids = body
        .clubs
        .filter(|clubs| !clubs.is_empty())
        .ok_or_else(|| ApiError::BadRequest("At least one club is required".to_string()))?;

    let saved_as_bag = if body.save_to_bag {
        let bag_name = format!("{course} - {date}");
        let bag = FavouriteRepository::new(state.pool())
            .create(user.id, &bag_name, &club_ids)
            .await?;
        Some(bag.id)
    } else {
        None
    };

    let reservation = ReservationRepository::new(state.pool())
        .create(user.id, course, date, &club_ids, saved_as_bag)
        .await?;

    let clubs = catalogue::lookup_by_ids(state.booqable(), &reservation.club_ids)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;
    let view = ReservationView::new(reservation, &club_index(clubs));

    Ok(Envelope::created("Reservation created successfully", view).into_response())
}

/// `GET /reservations`
///
/// All of the user's reservations, newest rental date first, enriched
/// with a single batched catalogue lookup.
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let reservations = ReservationRepository::new(state.pool()).list(user.id).await?;

    let mut distinct_ids: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for reservation in &reservations {
        for id in &reservation.club_ids {
            if seen.insert(id.as_str()) {
                distinct_ids.push(id.clone());
            }
        }
    }

    let clubs = catalogue::lookup_by_ids(state.booqable(), &distinct_ids)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;
    let index = club_index(clubs);

    let views: Vec<ReservationView> = reservations
        .into_iter()
        .map(|reservation| ReservationView::new(reservation, &index))
        .collect();

    Ok(Envelope::ok("Reservations fetched successfully", views).into_response())
}
