//! Vinyl Vault Lookup
//!
//! HTTP clients for the external services behind the catalog:
//!
//! - [`DiscogsClient`]: release search and marketplace price suggestions
//! - [`RecognitionClient`]: record identification from a photo
//! - [`enrich_top_candidate`]: search followed by concurrent per-candidate
//!   price lookups
//!
//! The search and price steps sit behind the [`CatalogSearch`] and
//! [`PriceSource`] traits so the enrichment flow can run against any
//! implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use vinyl_core::SearchQuery;
//! use vinyl_lookup::{enrich_top_candidate, DiscogsClient, DiscogsConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DiscogsClient::new(DiscogsConfig::with_credentials(
//!     DiscogsConfig::DEFAULT_BASE_URL,
//!     "key",
//!     "secret",
//!     "token",
//! ))?;
//!
//! let query = SearchQuery {
//!     artist: Some("Pink Floyd".into()),
//!     album: Some("Animals".into()),
//!     condition: Some("Very Good".into()),
//!     ..Default::default()
//! };
//!
//! let top = enrich_top_candidate(&client, &client, &query).await?;
//! println!("{} ~ {:?}", top.title, top.price_estimate);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod discogs;
mod enrichment;
mod error;
mod recognition;
mod types;

pub use discogs::{DiscogsClient, SEARCH_PAGE_SIZE};
pub use enrichment::{
    apply_price_suggestions, enrich_candidates, enrich_top_candidate, CatalogSearch, PriceSource,
    SearchOutcome,
};
pub use error::{LookupError, Result};
pub use recognition::{RecognitionClient, RECOGNITION_PROMPT};
pub use types::{DiscogsConfig, PriceSuggestion, PriceSuggestions, RecognitionConfig};
