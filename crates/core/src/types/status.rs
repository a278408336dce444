//! Status enums for persisted entities.

use serde::{Deserialize, Serialize};

/// Reservation lifecycle status.
///
/// Reservations are created `Confirmed` unless the client says otherwise;
/// the record is append-only, so a status only changes through support
/// tooling, never through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "reservation_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}
