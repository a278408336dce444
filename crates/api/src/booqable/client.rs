//! Booqable REST client implementation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::booqable::BooqableError;
use crate::booqable::types::{
    AvailabilityResponse, LocationsResponse, ProductsResponse, RawLocation, RentalDate,
};
use crate::catalogue::CatalogueSource;
use crate::config::BooqableConfig;

/// Client for the Booqable rental API.
///
/// Cheaply cloneable handle; all calls carry the configured bearer token.
/// No retries and no caching: a failed call surfaces immediately and every
/// read hits the upstream.
#[derive(Clone)]
pub struct BooqableClient {
    inner: Arc<BooqableClientInner>,
}

struct BooqableClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BooqableClient {
    /// Create a new Booqable API client.
    #[must_use]
    pub fn new(config: &BooqableConfig) -> Self {
        Self {
            inner: Arc::new(BooqableClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, BooqableError> {
        let url = format!("{}{path_and_query}", self.inner.base_url);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.api_key)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path_and_query,
                body = %response_text.chars().take(500).collect::<String>(),
                "Booqable returned non-success status"
            );
            return Err(BooqableError::Status {
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path_and_query,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse Booqable response"
            );
            BooqableError::Parse(e)
        })
    }

    /// Fetch one page of the product catalogue.
    ///
    /// # Errors
    ///
    /// Any upstream failure here is fatal for the caller's request; there
    /// is no partial-page degradation.
    #[instrument(skip(self))]
    pub async fn products_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<ProductsResponse, BooqableError> {
        self.get_json(&format!("/products?page={page}&per={per_page}"))
            .await
    }

    /// Fetch all rental locations.
    ///
    /// # Errors
    ///
    /// Returns an error on any upstream failure.
    #[instrument(skip(self))]
    pub async fn locations(&self) -> Result<Vec<RawLocation>, BooqableError> {
        let response: LocationsResponse = self.get_json("/locations").await?;
        Ok(response.locations)
    }

    /// Check whether one product is available on a date, optionally scoped
    /// to a location.
    ///
    /// # Errors
    ///
    /// Returns an error on any upstream failure. The availability resolver
    /// converts those errors to "available" (fail-open); the client itself
    /// never swallows them.
    #[instrument(skip(self))]
    pub async fn product_availability(
        &self,
        product_id: &str,
        location_id: Option<&str>,
        date: RentalDate,
    ) -> Result<bool, BooqableError> {
        let mut path = format!("/products/{product_id}/availability?from={date}&till={date}");
        if let Some(location_id) = location_id {
            path.push_str(&format!("&location_id={location_id}"));
        }

        let response: AvailabilityResponse = self.get_json(&path).await?;
        Ok(response.available)
    }
}

impl CatalogueSource for BooqableClient {
    async fn fetch_products_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<ProductsResponse, BooqableError> {
        self.products_page(page, per_page).await
    }

    async fn fetch_locations(&self) -> Result<Vec<RawLocation>, BooqableError> {
        self.locations().await
    }

    async fn check_availability(
        &self,
        product_id: &str,
        location_id: Option<&str>,
        date: RentalDate,
    ) -> Result<bool, BooqableError> {
        self.product_availability(product_id, location_id, date)
            .await
    }
}
