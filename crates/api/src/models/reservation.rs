//! Reservation domain type.

use chrono::{DateTime, Utc};

use fairway_core::{FavouriteSetId, ReservationId, ReservationStatus, UserId};

/// A club rental reservation, written once at checkout.
///
/// `course` is the course name as free text, not a location ID. `date` is
/// kept as the raw `YYYY-MM-DD` string the client sent: the API is
/// deliberately permissive about calendar validity, and a typed DATE column
/// would reject inputs the original contract accepts. Records are
/// append-only; nothing in the public API updates or deletes them.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub course: String,
    pub date: String,
    pub club_ids: Vec<String>,
    pub status: ReservationStatus,
    /// Set when the reservation was saved as a bag at checkout
    /// (`saveToBag`); points at the FavouriteSet created alongside it.
    pub saved_as_bag: Option<FavouriteSetId>,
    pub created_at: DateTime<Utc>,
}
