//! Reservation repository.
//!
//! Reservations are append-only: the public API creates and lists them,
//! nothing else.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fairway_core::{FavouriteSetId, ReservationId, ReservationStatus, UserId};

use super::RepositoryError;
use crate::models::Reservation;

/// Raw `reservations` row.
#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i32,
    user_id: i32,
    course: String,
    date: String,
    club_ids: Vec<String>,
    status: ReservationStatus,
    saved_as_bag: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: ReservationId::new(row.id),
            user_id: UserId::new(row.user_id),
            course: row.course,
            date: row.date,
            club_ids: row.club_ids,
            status: row.status,
            saved_as_bag: row.saved_as_bag.map(FavouriteSetId::new),
            created_at: row.created_at,
        }
    }
}

const RESERVATION_COLUMNS: &str =
    "id, user_id, course, date, club_ids, status, saved_as_bag, created_at";

/// Repository for reservation database operations.
pub struct ReservationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepository<'a> {
    /// Create a new reservation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a reservation for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        course: &str,
        date: &str,
        club_ids: &[String],
        saved_as_bag: Option<FavouriteSetId>,
    ) -> Result<Reservation, RepositoryError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "INSERT INTO reservations (user_id, course, date, club_ids, status, saved_as_bag)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(course)
        .bind(date)
        .bind(club_ids)
        .bind(ReservationStatus::default())
        .bind(saved_as_bag.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// All reservations for the user, newest rental date first.
    ///
    /// Dates are `YYYY-MM-DD` text, so lexicographic descending order is
    /// chronological descending order; creation time breaks ties.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Reservation>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE user_id = $1
             ORDER BY date DESC, created_at DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
