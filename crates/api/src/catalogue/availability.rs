//! Per-course, per-date club availability.
//!
//! Two modes:
//!
//! - **Course only** - rental stock is bulk and not tracked per location
//!   upstream, so every active club is offered unconditionally.
//! - **Course + date** - one upstream availability check per club, all
//!   dispatched concurrently. Each failed check is caught individually and
//!   the club is reported available (fail-open): a transient upstream error
//!   must never remove rentable inventory from what the customer can
//!   select. Under-offering costs real bookings; occasionally offering an
//!   already-booked club is resolved at the counter.

use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use serde::Serialize;

use super::{CatalogueSource, Club, fetch_all_products, sort_newest_first};
use crate::booqable::BooqableError;
use crate::booqable::types::RentalDate;

/// Reason tag attached to clubs that are unavailable on the queried date.
pub const UNAVAILABLE_ON_DATE: &str = "on-this-date";

/// A club tagged with availability for a course/date query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableClub {
    #[serde(flatten)]
    pub club: Club,
    pub available: bool,
    pub unavailability_reason: Option<String>,
}

impl AvailableClub {
    fn tagged(club: Club, available: bool) -> Self {
        Self {
            club,
            available,
            unavailability_reason: (!available).then(|| UNAVAILABLE_ON_DATE.to_string()),
        }
    }
}

/// Resolve which clubs are available at a course, optionally on a date.
///
/// The course name is matched case-insensitively against the upstream
/// location list; an unknown course skips location scoping rather than
/// failing, since bulk stock is not location-bound anyway.
///
/// # Errors
///
/// Returns an error if the catalogue or location fetch fails. Per-club
/// availability failures never surface here; they degrade to "available".
pub async fn available_clubs<S: CatalogueSource>(
    source: &S,
    course: &str,
    date: Option<RentalDate>,
) -> Result<Vec<AvailableClub>, BooqableError> {
    let products = fetch_all_products(source).await?;
    let mut clubs: Vec<Club> = products
        .into_iter()
        .filter(|p| !p.archived)
        .map(Club::from_raw)
        .collect();
    sort_newest_first(&mut clubs);

    let Some(date) = date else {
        return Ok(clubs
            .into_iter()
            .map(|club| AvailableClub::tagged(club, true))
            .collect());
    };

    let location_id = resolve_location(source, course).await?;

    let checks = clubs.iter().map(|club| {
        let location_id = location_id.as_deref();
        async move {
            match source.check_availability(&club.id, location_id, date).await {
                Ok(available) => available,
                Err(error) => {
                    tracing::warn!(
                        club_id = %club.id,
                        error = %error,
                        "availability check failed, treating club as available"
                    );
                    true
                }
            }
        }
    });
    let results = join_all(checks).await;

    Ok(clubs
        .into_iter()
        .zip(results)
        .map(|(club, available)| AvailableClub::tagged(club, available))
        .collect())
}

/// Match a course name to an upstream location ID, case-insensitively.
async fn resolve_location<S: CatalogueSource>(
    source: &S,
    course: &str,
) -> Result<Option<String>, BooqableError> {
    let locations = source.fetch_locations().await?;
    let course = course.trim();

    Ok(locations
        .into_iter()
        .find(|l| l.name.trim().eq_ignore_ascii_case(course))
        .map(|l| l.id))
}

/// All dates of a month as `YYYY-MM-DD` strings.
///
/// Bulk stock has no per-day calendar upstream, so the bookable dates for
/// a course are simply the days of the month; the client filters past
/// dates itself. Returns `None` for an invalid year/month pair - unlike
/// the availability date, this endpoint does calendar math and cannot be
/// permissive.
#[must_use]
pub fn month_dates(year: i32, month: u32) -> Option<Vec<String>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let mut dates = Vec::new();
    let mut day = first;
    while day.month() == month {
        dates.push(day.format("%Y-%m-%d").to_string());
        day = day.succ_opt()?;
    }
    Some(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::{FakeCatalogue, location, product};

    fn course_catalogue() -> FakeCatalogue {
        let mut archived = product("arch", "Museum Piece", &[], 5);
        archived.archived = true;
        let mut source = FakeCatalogue::with_products(vec![
            product("new", "New Driver", &["driver"], 0),
            product("old", "Old Iron", &["iron"], 10),
            archived,
        ]);
        source.locations = vec![location("loc1", "Pebble Creek")];
        source
    }

    #[tokio::test]
    async fn test_course_only_mode_everything_available() {
        let source = course_catalogue();
        let clubs = available_clubs(&source, "Pebble Creek", None)
            .await
            .expect("resolve");

        assert_eq!(clubs.len(), 2); // archived excluded
        assert!(clubs.iter().all(|c| c.available));
        assert!(clubs.iter().all(|c| c.unavailability_reason.is_none()));
    }

    #[tokio::test]
    async fn test_dated_mode_tags_unavailable_clubs() {
        let mut source = course_catalogue();
        source.unavailable.insert("old".to_string());
        let date = RentalDate::parse("2025-07-14").expect("valid");

        let clubs = available_clubs(&source, "Pebble Creek", Some(date))
            .await
            .expect("resolve");

        let new = clubs.iter().find(|c| c.club.id == "new").expect("present");
        assert!(new.available);
        assert!(new.unavailability_reason.is_none());

        let old = clubs.iter().find(|c| c.club.id == "old").expect("present");
        assert!(!old.available);
        assert_eq!(old.unavailability_reason.as_deref(), Some(UNAVAILABLE_ON_DATE));
    }

    #[tokio::test]
    async fn test_failed_availability_check_fails_open() {
        let mut source = course_catalogue();
        source.failing_availability.insert("old".to_string());
        let date = RentalDate::parse("2025-07-14").expect("valid");

        let clubs = available_clubs(&source, "Pebble Creek", Some(date))
            .await
            .expect("resolve");

        // The failing club is present and available, never omitted or
        // marked unavailable because of a transport error.
        let old = clubs.iter().find(|c| c.club.id == "old").expect("present");
        assert!(old.available);
        assert!(old.unavailability_reason.is_none());
    }

    #[tokio::test]
    async fn test_unknown_course_proceeds_without_location_scope() {
        let source = course_catalogue();
        let date = RentalDate::parse("2025-07-14").expect("valid");

        let clubs = available_clubs(&source, "No Such Course", Some(date))
            .await
            .expect("resolve");
        assert_eq!(clubs.len(), 2);
    }

    #[tokio::test]
    async fn test_course_match_is_case_insensitive() {
        let source = course_catalogue();
        let resolved = resolve_location(&source, "  pebble creek ")
            .await
            .expect("resolve");
        assert_eq!(resolved.as_deref(), Some("loc1"));
    }

    #[tokio::test]
    async fn test_results_sorted_newest_first() {
        let source = course_catalogue();
        let clubs = available_clubs(&source, "Pebble Creek", None)
            .await
            .expect("resolve");
        let ids: Vec<&str> = clubs.iter().map(|c| c.club.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_month_dates_regular_and_leap() {
        let feb_2025 = month_dates(2025, 2).expect("valid month");
        assert_eq!(feb_2025.len(), 28);
        assert_eq!(feb_2025.first().map(String::as_str), Some("2025-02-01"));
        assert_eq!(feb_2025.last().map(String::as_str), Some("2025-02-28"));

        let feb_2024 = month_dates(2024, 2).expect("valid month");
        assert_eq!(feb_2024.len(), 29);
    }

    #[test]
    fn test_month_dates_invalid_month() {
        assert!(month_dates(2025, 13).is_none());
        assert!(month_dates(2025, 0).is_none());
    }

    #[test]
    fn test_available_club_serializes_flat() {
        let club = Club::from_raw(product("p1", "Driver", &["driver"], 0));
        let tagged = AvailableClub::tagged(club, false);
        let json = serde_json::to_value(&tagged).expect("serialize");
        assert_eq!(json["id"], "p1");
        assert_eq!(json["available"], false);
        assert_eq!(json["unavailabilityReason"], UNAVAILABLE_ON_DATE);
    }
}
