//! Favourite-set ("bag") route handlers.
//!
//! All handlers require a bearer token. Lookups for IDs that do not match
//! the user answer HTTP 200 with `success: false` (see
//! [`crate::response`]); listing enrichment batches every distinct club ID
//! across all sets into a single catalogue lookup.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fairway_core::FavouriteSetId;

use crate::catalogue::{self, Club};
use crate::db::favourites::FavouriteRepository;
use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::FavouriteSet;
use crate::response::Envelope;
use crate::routes::club_index;
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "Favourite set not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavouriteBody {
    pub set_name: Option<String>,
    pub clubs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFavouriteBody {
    pub set_name: Option<String>,
    pub clubs: Option<Vec<String>>,
}

/// A favourite set enriched with live catalogue records.
///
/// `club_ids` is the persisted reference list; `clubs` carries the
/// matching live products. IDs that vanished upstream stay in `club_ids`
/// so the client can fall back to displaying the bare ID.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteSetView {
    pub id: FavouriteSetId,
    pub set_name: String,
    pub club_ids: Vec<String>,
    pub clubs: Vec<Club>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FavouriteSetView {
    pub(crate) fn new(set: FavouriteSet, catalogue: &HashMap<String, Club>) -> Self {
        let clubs = set
            .club_ids
            .iter()
            .filter_map(|id| catalogue.get(id).cloned())
            .collect();

        Self {
            id: set.id,
            set_name: set.set_name,
            club_ids: set.club_ids,
            clubs,
            created_at: set.created_at,
            updated_at: set.updated_at,
        }
    }
}

/// Enrich one set with a dedicated catalogue lookup.
async fn enrich_one(state: &AppState, set: FavouriteSet) -> Result<FavouriteSetView> {
    let clubs = catalogue::lookup_by_ids(state.booqable(), &set.club_ids)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;
    Ok(FavouriteSetView::new(set, &club_index(clubs)))
}

/// `POST /favourites`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateFavouriteBody>,
) -> Result<Response> {
    let set_name = body
        .set_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("setName is required".to_string()))?;
    let club_ids = body.clubs.unwrap_or_default();

    let set = FavouriteRepository::new(state.pool())
        .create(user.id, set_name, &club_ids)
        .await?;
    let view = enrich_one(&state, set).await?;

    Ok(Envelope::created("Favourite set created successfully", view).into_response())
}

/// `GET /favourites`
///
/// All of the user's sets, newest-updated first. One catalogue lookup
/// covers every distinct club ID across all sets.
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let sets = FavouriteRepository::new(state.pool())
        .list_active(user.id)
        .await?;

    let mut distinct_ids: Vec<String> = Vec::new();
    {
        let mut seen = std::collections::HashSet::new();
        for set in &sets {
            for id in &set.club_ids {
                if seen.insert(id.as_str()) {
                    distinct_ids.push(id.clone());
                }
            }
        }
    }

    let clubs = catalogue::lookup_by_ids(state.booqable(), &distinct_ids)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch clubs from Booqable", e))?;
    let index = club_index(clubs);

    let views: Vec<FavouriteSetView> = sets
        .into_iter()
        .map(|set| FavouriteSetView::new(set, &index))
        .collect();

    Ok(Envelope::ok("Favourite sets fetched successfully", views).into_response())
}

/// `GET /favourites/{id}`
pub async fn show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let Some(id) = parse_set_id(&id) else {
        return Ok(Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response());
    };

    let set = FavouriteRepository::new(state.pool())
        .get_active(user.id, id)
        .await?;

    Ok(match set {
        Some(set) => {
            let view = enrich_one(&state, set).await?;
            Envelope::ok("Favourite set fetched successfully", view).into_response()
        }
        None => Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response(),
    })
}

/// `PUT /favourites/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateFavouriteBody>,
) -> Result<Response> {
    let Some(id) = parse_set_id(&id) else {
        return Ok(Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response());
    };

    // A rename to an empty name is a client error, not a no-op.
    let set_name = match &body.set_name {
        Some(name) => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ApiError::BadRequest("setName cannot be empty".to_string()));
            }
            Some(trimmed)
        }
        None => None,
    };

    let set = FavouriteRepository::new(state.pool())
        .update(user.id, id, set_name, body.clubs.as_deref())
        .await?;

    Ok(match set {
        Some(set) => {
            let view = enrich_one(&state, set).await?;
            Envelope::ok("Favourite set updated successfully", view).into_response()
        }
        None => Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response(),
    })
}

/// `DELETE /favourites/{id}`
///
/// Soft-deletes the set and writes a deletion-log snapshot atomically.
pub async fn destroy(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let Some(id) = parse_set_id(&id) else {
        return Ok(Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response());
    };

    let deleted = FavouriteRepository::new(state.pool())
        .soft_delete(user.id, id)
        .await?;

    Ok(match deleted {
        Some(_) => Envelope::ok("Favourite set deleted successfully", serde_json::Value::Null)
            .into_response(),
        None => Envelope::not_found_ok(NOT_FOUND_MESSAGE).into_response(),
    })
}

/// A garbage path ID is indistinguishable from an ID the user does not
/// own: both get the not-found envelope.
fn parse_set_id(raw: &str) -> Option<FavouriteSetId> {
    raw.parse::<i32>().ok().map(FavouriteSetId::new)
}
