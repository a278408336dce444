//! Wire types for the Booqable REST API.
//!
//! These mirror the upstream JSON shapes; the API-facing club types with
//! derived category tags live in [`crate::catalogue`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One page of the upstream product catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<RawProduct>,
    pub meta: PageMeta,
}

/// Page metadata; only the total count matters for the fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub total_count: u64,
}

/// A product as Booqable returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    /// Opaque upstream-assigned ID.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub archived: bool,
    /// Ordered free-text tag list; category/shaft/iron type are derived
    /// from it at read time.
    #[serde(default, rename = "tag_list")]
    pub tags: Vec<String>,
    /// Creation timestamp, used for newest-first sorting. Missing or
    /// unparseable values become `None` and sort as epoch zero.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Locations list response.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<RawLocation>,
}

/// A rental location ("course") as Booqable returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub address_line_2: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl RawLocation {
    /// Join the non-empty address components into one display string.
    #[must_use]
    pub fn display_address(&self) -> String {
        [
            self.address_line_1.as_deref(),
            self.address_line_2.as_deref(),
            self.zipcode.as_deref(),
            self.city.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Per-product availability response.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// A rental date as sent upstream.
///
/// Deliberately NOT calendar-validated: the contract accepts any
/// three-dash-part numeric string (month 13, day 40) and forwards it to
/// Booqable as-is, trusting the upstream response. Only the shape is
/// enforced, because the query needs numeric components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RentalDate {
    /// Parse `YYYY-MM-DD`-shaped input: exactly three dash-separated
    /// numeric parts. Returns `None` for anything else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split('-');
        let year = parts.next()?.trim().parse::<i32>().ok()?;
        let month = parts.next()?.trim().parse::<u32>().ok()?;
        let day = parts.next()?.trim().parse::<u32>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { year, month, day })
    }
}

impl fmt::Display for RentalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Deserialize a timestamp string, mapping absent or unparseable values to
/// `None` instead of failing the whole payload.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_product_minimal_payload() {
        let product: RawProduct = serde_json::from_str(
            r#"{"id": "p1", "name": "Big Dog Driver"}"#,
        )
        .expect("deserialize");
        assert_eq!(product.id, "p1");
        assert!(!product.archived);
        assert!(product.tags.is_empty());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_raw_product_full_payload() {
        let product: RawProduct = serde_json::from_str(
            r#"{
                "id": "p2",
                "name": "Tour Blade Iron Set",
                "sku": "TB-IRONS",
                "brand": "Mizuno",
                "archived": true,
                "tag_list": ["iron", "blades", "stiff"],
                "created_at": "2024-06-01T10:00:00Z"
            }"#,
        )
        .expect("deserialize");
        assert!(product.archived);
        assert_eq!(product.tags, vec!["iron", "blades", "stiff"]);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_unparseable_created_at_becomes_none() {
        let product: RawProduct = serde_json::from_str(
            r#"{"id": "p3", "name": "Old Putter", "created_at": "not-a-date"}"#,
        )
        .expect("deserialize");
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_display_address_skips_empty_parts() {
        let location = RawLocation {
            id: "l1".to_string(),
            name: "Pebble Creek".to_string(),
            address_line_1: Some("1 Fairway Drive".to_string()),
            address_line_2: Some("".to_string()),
            zipcode: Some("90210".to_string()),
            city: Some("Carmel".to_string()),
            country: None,
        };
        assert_eq!(location.display_address(), "1 Fairway Drive, 90210, Carmel");
    }

    #[test]
    fn test_rental_date_parse_valid() {
        let date = RentalDate::parse("2025-07-14").expect("valid shape");
        assert_eq!((date.year, date.month, date.day), (2025, 7, 14));
        assert_eq!(date.to_string(), "2025-07-14");
    }

    #[test]
    fn test_rental_date_parse_accepts_invalid_calendar_dates() {
        // Month 13, day 40 pass the shape check and go upstream as-is.
        let date = RentalDate::parse("2025-13-40").expect("shape is valid");
        assert_eq!((date.month, date.day), (13, 40));
    }

    #[test]
    fn test_rental_date_parse_rejects_wrong_shapes() {
        assert!(RentalDate::parse("2025-07").is_none());
        assert!(RentalDate::parse("2025-07-14-00").is_none());
        assert!(RentalDate::parse("2025/07/14").is_none());
        assert!(RentalDate::parse("july-14-2025").is_none());
        assert!(RentalDate::parse("").is_none());
    }
}
