//! Booqable rental-inventory API client.
//!
//! # Architecture
//!
//! - Plain REST+JSON over `reqwest`; every call carries a static bearer
//!   token from injected configuration
//! - Booqable is source of truth for the club catalogue - NO local sync,
//!   no caching, direct API calls on every read
//! - Upstream error bodies are logged server-side (truncated) and never
//!   forwarded to API clients
//!
//! # Failure semantics
//!
//! The client reports every upstream failure as an error. What happens next
//! is the caller's business: catalogue and location fetches are fatal for
//! the request, while per-product availability lookups are converted to
//! "available" by the resolver (see [`crate::catalogue::availability`]).

mod client;
pub mod types;

pub use client::BooqableClient;

use thiserror::Error;

/// Errors that can occur when talking to the Booqable API.
#[derive(Debug, Error)]
pub enum BooqableError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Booqable answered with a non-success status.
    #[error("Booqable returned HTTP {status}")]
    Status {
        /// The upstream HTTP status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
