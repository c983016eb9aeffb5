//! Price enrichment of catalog search results.
//!
//! A search yields up to five ranked candidates. Every candidate gets its own
//! price suggestion lookup; the lookups run concurrently and a failure only
//! affects the candidate it belongs to. The top-ranked candidate is returned.

use crate::error::{LookupError, Result};
use crate::types::PriceSuggestions;
use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};
use vinyl_core::types::{ConditionGrade, SearchCandidate, SearchQuery};

/// Result of a catalog search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The search ran and matched nothing
    NoMatch,
    /// Matches in service ranking order
    Candidates(Vec<SearchCandidate>),
}

/// A catalog that can be searched for releases
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome>;
}

/// A source of marketplace price suggestions
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn price_suggestions(&self, release_id: i64) -> Result<PriceSuggestions>;
}

/// Merge price suggestions onto a candidate.
///
/// Low is the `Poor` price, high the `Mint` price, and the estimate the price
/// for `grade`. An empty suggestion set leaves the candidate untouched.
pub fn apply_price_suggestions(
    candidate: &mut SearchCandidate,
    suggestions: &PriceSuggestions,
    grade: Option<ConditionGrade>,
) {
    if suggestions.is_empty() {
        return;
    }

    candidate.price_low = suggestions.value_for(ConditionGrade::Poor.marketplace_label());
    candidate.price_high = suggestions.value_for(ConditionGrade::Mint.marketplace_label());
    candidate.price_estimate =
        grade.and_then(|grade| suggestions.value_for(grade.marketplace_label()));
}

/// Look up prices for every candidate concurrently.
///
/// Order is preserved. Candidates whose lookup failed come back unpriced with
/// `price_error` set.
pub async fn enrich_candidates<P>(
    prices: &P,
    candidates: Vec<SearchCandidate>,
    grade: Option<ConditionGrade>,
) -> Vec<SearchCandidate>
where
    P: PriceSource + ?Sized,
{
    let lookups = candidates.into_iter().map(|mut candidate| async move {
        match prices.price_suggestions(candidate.external_id).await {
            Ok(suggestions) => {
                apply_price_suggestions(&mut candidate, &suggestions, grade);
            }
            Err(e) => {
                warn!(
                    release_id = candidate.external_id,
                    error = %e,
                    "Price lookup failed, leaving candidate unpriced"
                );
                candidate.price_error = Some(e.to_string());
            }
        }
        candidate
    });

    join_all(lookups).await
}

/// Search the catalog and return the top match with its prices.
///
/// Returns `LookupError::NoResults` without any price lookup when the search
/// matched nothing.
pub async fn enrich_top_candidate<C, P>(
    catalog: &C,
    prices: &P,
    query: &SearchQuery,
) -> Result<SearchCandidate>
where
    C: CatalogSearch + ?Sized,
    P: PriceSource + ?Sized,
{
    let candidates = match catalog.search(query).await? {
        SearchOutcome::Candidates(candidates) if !candidates.is_empty() => candidates,
        _ => return Err(LookupError::NoResults),
    };

    debug!(count = candidates.len(), "Enriching search candidates");

    enrich_candidates(prices, candidates, query.condition_grade())
        .await
        .into_iter()
        .next()
        .ok_or(LookupError::NoResults)
}
