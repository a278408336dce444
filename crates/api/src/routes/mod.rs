//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database ping)
//!
//! # Auth (public)
//! POST /auth/requestMagicLink      - Start magic-link sign-in
//! POST /auth/verify?token=...      - Consume a magic link, get a bearer token
//! POST /auth/login                 - Password login (CLI-provisioned accounts)
//!
//! # Catalogue (public, live from Booqable)
//! GET  /clubs                      - Filtered, paginated club listing
//! GET  /clubs/available            - Availability per course (and date)
//! GET  /clubs/{id}                 - Single club
//! GET  /courses                    - Rental locations
//! GET  /courses/{id}/available-dates - Bookable dates for a month
//!
//! # Favourites (bearer auth)
//! POST   /favourites               - Create a bag
//! GET    /favourites               - List bags (batch-enriched)
//! GET    /favourites/{id}          - One bag
//! PUT    /favourites/{id}          - Rename / replace clubs
//! DELETE /favourites/{id}          - Soft-delete + audit snapshot
//!
//! # Reservations (bearer auth)
//! POST /reservations               - Create (optionally saving a bag)
//! GET  /reservations               - List (batch-enriched)
//! ```

pub mod auth;
pub mod clubs;
pub mod courses;
pub mod favourites;
pub mod reservations;

use std::collections::HashMap;

use axum::{
    Router,
    routing::{get, post},
};

use crate::catalogue::Club;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        // camelCase to match the path the SPA was built against
        .route("/requestMagicLink", post(auth::request_magic_link))
        .route("/verify", post(auth::verify))
        .route("/login", post(auth::login))
}

/// Create the club routes router.
pub fn club_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(clubs::index))
        .route("/available", get(clubs::available))
        .route("/{id}", get(clubs::show))
}

/// Create the course routes router.
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::index))
        .route("/{location_id}/available-dates", get(courses::available_dates))
}

/// Create the favourites routes router.
pub fn favourite_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(favourites::create).get(favourites::index))
        .route(
            "/{id}",
            get(favourites::show)
                .put(favourites::update)
                .delete(favourites::destroy),
        )
}

/// Create the reservations routes router.
pub fn reservation_routes() -> Router<AppState> {
    Router::new().route("/", post(reservations::create).get(reservations::index))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/clubs", club_routes())
        .nest("/courses", course_routes())
        .nest("/favourites", favourite_routes())
        .nest("/reservations", reservation_routes())
}

/// Index enriched clubs by ID for per-record re-mapping.
pub(crate) fn club_index(clubs: Vec<Club>) -> HashMap<String, Club> {
    clubs.into_iter().map(|club| (club.id.clone(), club)).collect()
}
