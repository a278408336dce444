//! Club catalogue aggregation and filtering.
//!
//! The catalogue lives in Booqable and is never persisted locally: every
//! read re-fetches the full product list, concatenating all upstream pages
//! (page 1 first, then pages 2..N fetched concurrently and kept in page
//! order), then filters, sorts and paginates in memory. No caching, no
//! deduplication.
//!
//! [`CatalogueSource`] is the seam between this logic and the HTTP client:
//! production uses [`crate::booqable::BooqableClient`], tests use an
//! in-memory double.

pub mod availability;
pub mod tags;

pub use tags::{Category, IronType, ShaftType};

use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::booqable::BooqableError;
use crate::booqable::types::{ProductsResponse, RawLocation, RawProduct, RentalDate};

/// Upstream page size used for aggregation.
pub const PAGE_SIZE: u64 = 100;
/// Default API page size.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Maximum API page size.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Source of catalogue data.
///
/// Mirrors the three upstream endpoints the aggregation layer needs. All
/// methods are one-shot; retries and caching are deliberately absent.
pub trait CatalogueSource: Send + Sync {
    /// Fetch one page of the product catalogue.
    fn fetch_products_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> impl Future<Output = Result<ProductsResponse, BooqableError>> + Send;

    /// Fetch all rental locations.
    fn fetch_locations(&self)
    -> impl Future<Output = Result<Vec<RawLocation>, BooqableError>> + Send;

    /// Check one product's availability on a date, optionally scoped to a
    /// location.
    fn check_availability(
        &self,
        product_id: &str,
        location_id: Option<&str>,
        date: RentalDate,
    ) -> impl Future<Output = Result<bool, BooqableError>> + Send;
}

/// A catalogue club as served by the API: the upstream product plus the
/// tags derived from its tag list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub brand: Option<String>,
    pub archived: bool,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub shaft_type: Option<ShaftType>,
    pub iron_type: Option<IronType>,
}

impl Club {
    /// Build a club from the upstream product, deriving the tag fields.
    #[must_use]
    pub fn from_raw(raw: RawProduct) -> Self {
        let category = Category::from_tags(&raw.tags);
        let shaft_type = ShaftType::from_tags(&raw.tags);
        let iron_type = IronType::from_tags(&raw.tags);

        Self {
            id: raw.id,
            name: raw.name,
            sku: raw.sku,
            description: raw.description,
            photo_url: raw.photo_url,
            brand: raw.brand,
            archived: raw.archived,
            tags: raw.tags,
            created_at: raw.created_at,
            category,
            shaft_type,
            iron_type,
        }
    }
}

/// Query parameters accepted by the club listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClubQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub is_active: Option<String>,
    pub archived: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// One page of the filtered catalogue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPage {
    pub clubs: Vec<Club>,
    /// Post-filter, pre-pagination count.
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub limit: u64,
}

/// Archived/active filter resolved from the `archived` and `isActive`
/// query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ArchivedFilter {
    /// Default: only non-archived items.
    #[default]
    ActiveOnly,
    /// `archived=true` or `isActive=false`: only archived items.
    ArchivedOnly,
    /// `archived=all` or `isActive=all`: no filtering.
    All,
}

impl ArchivedFilter {
    fn from_query(query: &ClubQuery) -> Self {
        let archived = query.archived.as_deref();
        let is_active = query.is_active.as_deref();

        if archived == Some("all") || is_active == Some("all") {
            Self::All
        } else if archived == Some("true") || is_active == Some("false") {
            Self::ArchivedOnly
        } else {
            Self::ActiveOnly
        }
    }

    const fn keeps(self, archived: bool) -> bool {
        match self {
            Self::ActiveOnly => !archived,
            Self::ArchivedOnly => archived,
            Self::All => true,
        }
    }
}

/// Fetch the complete product catalogue from upstream.
///
/// Page 1 is fetched first to learn the total count; the remaining pages
/// are then requested concurrently and concatenated in page-index order,
/// so the result order never depends on network completion order.
///
/// # Errors
///
/// A single failed page fails the whole aggregation; there are no partial
/// results.
pub async fn fetch_all_products<S: CatalogueSource>(
    source: &S,
) -> Result<Vec<RawProduct>, BooqableError> {
    let first = source.fetch_products_page(1, PAGE_SIZE).await?;
    let total_pages = first.meta.total_count.div_ceil(PAGE_SIZE);

    let mut products = first.products;
    if total_pages > 1 {
        let rest =
            try_join_all((2..=total_pages).map(|page| source.fetch_products_page(page, PAGE_SIZE)))
                .await?;
        for page in rest {
            products.extend(page.products);
        }
    }

    Ok(products)
}

/// List catalogue clubs with filtering, sorting and pagination.
///
/// # Errors
///
/// Returns an error if the upstream aggregation fails.
pub async fn list_clubs<S: CatalogueSource>(
    source: &S,
    query: &ClubQuery,
) -> Result<ClubPage, BooqableError> {
    let products = fetch_all_products(source).await?;
    let clubs = apply_filters(products, query);
    Ok(paginate(clubs, query.page, query.limit))
}

/// Enrich a list of stored club IDs with live catalogue records.
///
/// IDs that no longer exist upstream are silently dropped; callers keep
/// the raw ID list alongside so clients can fall back to displaying it.
/// An empty input returns empty without touching upstream.
///
/// # Errors
///
/// Returns an error if the upstream aggregation fails.
pub async fn lookup_by_ids<S: CatalogueSource>(
    source: &S,
    ids: &[String],
) -> Result<Vec<Club>, BooqableError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let products = fetch_all_products(source).await?;

    let mut clubs: Vec<Club> = products
        .into_iter()
        .filter(|p| wanted.contains(p.id.as_str()))
        .map(Club::from_raw)
        .collect();
    sort_newest_first(&mut clubs);

    Ok(clubs)
}

/// Apply archived/search/brand/category filters and sort newest-first.
fn apply_filters(products: Vec<RawProduct>, query: &ClubQuery) -> Vec<Club> {
    let archived_filter = ArchivedFilter::from_query(query);

    let mut clubs: Vec<Club> = products
        .into_iter()
        .filter(|p| archived_filter.keeps(p.archived))
        .map(Club::from_raw)
        .collect();

    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        clubs.retain(|c| c.name.to_lowercase().contains(&needle));
    }
    if let Some(brand) = &query.brand {
        clubs.retain(|c| c.brand.as_deref() == Some(brand.as_str()));
    }
    if let Some(category) = &query.category {
        clubs.retain(|c| c.category.is_some_and(|cat| cat.as_str() == category.as_str()));
    }

    sort_newest_first(&mut clubs);
    clubs
}

/// Sort clubs descending by creation time; items without a usable
/// timestamp sort as epoch zero, i.e. last.
pub(crate) fn sort_newest_first(clubs: &mut [Club]) {
    clubs.sort_by_key(|c| std::cmp::Reverse(c.created_at.unwrap_or(DateTime::UNIX_EPOCH)));
}

/// Slice out the requested page. 1-based page index, limit clamped to
/// `[1, MAX_PAGE_LIMIT]`.
fn paginate(clubs: Vec<Club>, page: Option<u64>, limit: Option<u64>) -> ClubPage {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let page = page.unwrap_or(1).max(1);

    let total = clubs.len() as u64;
    let total_pages = total.div_ceil(limit);

    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let clubs = clubs.into_iter().skip(start).take(take).collect();

    ClubPage {
        clubs,
        total,
        total_pages,
        page,
        limit,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory [`CatalogueSource`] double for unit tests.

    use std::collections::HashSet;

    use chrono::{DateTime, Duration, Utc};

    use super::CatalogueSource;
    use crate::booqable::BooqableError;
    use crate::booqable::types::{
        PageMeta, ProductsResponse, RawLocation, RawProduct, RentalDate,
    };

    /// Fixed reference time so tests are deterministic.
    fn base_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    /// Build a product created `age_days` before the reference time (larger
    /// means older).
    pub fn product(id: &str, name: &str, tags: &[&str], age_days: i64) -> RawProduct {
        RawProduct {
            id: id.to_string(),
            name: name.to_string(),
            sku: None,
            description: None,
            photo_url: None,
            brand: None,
            archived: false,
            tags: tags.iter().map(ToString::to_string).collect(),
            created_at: Some(base_time() - Duration::days(age_days)),
        }
    }

    /// Build a location.
    pub fn location(id: &str, name: &str) -> RawLocation {
        RawLocation {
            id: id.to_string(),
            name: name.to_string(),
            address_line_1: None,
            address_line_2: None,
            zipcode: None,
            city: None,
            country: None,
        }
    }

    #[derive(Default)]
    pub struct FakeCatalogue {
        pub products: Vec<RawProduct>,
        pub locations: Vec<RawLocation>,
        /// Product IDs reported unavailable on any date.
        pub unavailable: HashSet<String>,
        /// Product IDs whose availability check errors.
        pub failing_availability: HashSet<String>,
        /// Pages whose fetch errors.
        pub failing_pages: HashSet<u64>,
    }

    impl FakeCatalogue {
        pub fn with_products(products: Vec<RawProduct>) -> Self {
            Self {
                products,
                ..Self::default()
            }
        }
    }

    impl CatalogueSource for FakeCatalogue {
        async fn fetch_products_page(
            &self,
            page: u64,
            per_page: u64,
        ) -> Result<ProductsResponse, BooqableError> {
            if self.failing_pages.contains(&page) {
                return Err(BooqableError::Status { status: 500 });
            }

            let start = usize::try_from((page - 1) * per_page).expect("page offset fits");
            let take = usize::try_from(per_page).expect("page size fits");
            let products = self
                .products
                .iter()
                .skip(start)
                .take(take)
                .cloned()
                .collect();

            Ok(ProductsResponse {
                products,
                meta: PageMeta {
                    total_count: self.products.len() as u64,
                },
            })
        }

        async fn fetch_locations(&self) -> Result<Vec<RawLocation>, BooqableError> {
            Ok(self.locations.clone())
        }

        async fn check_availability(
            &self,
            product_id: &str,
            _location_id: Option<&str>,
            _date: RentalDate,
        ) -> Result<bool, BooqableError> {
            if self.failing_availability.contains(product_id) {
                return Err(BooqableError::Status { status: 502 });
            }
            Ok(!self.unavailable.contains(product_id))
        }
    }
}
