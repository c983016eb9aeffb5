//! Discogs database search and marketplace price suggestions.

use crate::enrichment::{CatalogSearch, PriceSource, SearchOutcome};
use crate::error::{LookupError, Result};
use crate::types::{DiscogsConfig, PriceSuggestions};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};
use vinyl_core::lenient;
use vinyl_core::types::{SearchCandidate, SearchQuery};

/// Maximum number of candidates requested per search
pub const SEARCH_PAGE_SIZE: u32 = 5;

/// Client for the Discogs REST API.
pub struct DiscogsClient {
    http: Client,
    config: DiscogsConfig,
}

struct SearchCredentials<'a> {
    key: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    year: Option<String>,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    thumb: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    genre: Option<Vec<String>>,
    #[serde(default)]
    style: Option<Vec<String>>,
}

impl DiscogsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DiscogsConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            config: DiscogsConfig {
                base_url,
                ..config
            },
        })
    }

    /// Search releases matching the usable terms of `query`.
    ///
    /// Terms that are missing, blank or `"Unknown"` are left out of the
    /// request. All three credentials must be configured, since a search is
    /// always followed by price lookups.
    pub async fn search_releases(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let creds = self.search_credentials()?;
        self.personal_token()?;

        let url = format!("{}/database/search", self.config.base_url);
        let params = search_params(query);

        debug!(url = %url, params = ?params, "Searching Discogs");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Discogs key={}, secret={}", creds.key, creds.secret),
            )
            .send()
            .await?;

        let response = error_for_status(response).await?;
        let data: SearchResponse = response.json().await.map_err(|e| {
            LookupError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        let candidates: Vec<SearchCandidate> = data
            .results
            .unwrap_or_default()
            .into_iter()
            .map(to_candidate)
            .collect();

        if candidates.is_empty() {
            info!("Discogs search matched nothing");
            return Ok(SearchOutcome::NoMatch);
        }

        debug!(count = candidates.len(), "Discogs search returned candidates");
        Ok(SearchOutcome::Candidates(candidates))
    }

    /// Fetch marketplace price suggestions for a release.
    pub async fn fetch_price_suggestions(&self, release_id: i64) -> Result<PriceSuggestions> {
        let token = self.personal_token()?;
        let url = format!(
            "{}/marketplace/price_suggestions/{}",
            self.config.base_url, release_id
        );

        debug!(url = %url, "Fetching price suggestions");

        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Discogs token={}", token),
            )
            .send()
            .await?;

        let response = error_for_status(response).await?;
        response.json().await.map_err(|e| {
            LookupError::ParseError(format!(
                "Failed to parse price suggestions for {}: {}",
                release_id, e
            ))
        })
    }

    fn search_credentials(&self) -> Result<SearchCredentials<'_>> {
        let key = configured(self.config.api_key.as_deref())
            .ok_or(LookupError::MissingCredentials("Discogs API key"))?;
        let secret = configured(self.config.api_secret.as_deref())
            .ok_or(LookupError::MissingCredentials("Discogs API secret"))?;
        Ok(SearchCredentials { key, secret })
    }

    fn personal_token(&self) -> Result<&str> {
        configured(self.config.personal_token.as_deref())
            .ok_or(LookupError::MissingCredentials("Discogs personal access token"))
    }
}

#[async_trait]
impl CatalogSearch for DiscogsClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        self.search_releases(query).await
    }
}

#[async_trait]
impl PriceSource for DiscogsClient {
    async fn price_suggestions(&self, release_id: i64) -> Result<PriceSuggestions> {
        self.fetch_price_suggestions(release_id).await
    }
}

fn configured(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(artist) = query.artist_term() {
        params.push(("artist", artist.to_string()));
    }
    if let Some(album) = query.album_term() {
        params.push(("release_title", album.to_string()));
    }
    if let Some(year) = query.year_term() {
        params.push(("year", year.to_string()));
    }
    params.push(("type", "release".to_string()));
    params.push(("per_page", SEARCH_PAGE_SIZE.to_string()));
    params
}

/// Discogs titles read `"Artist - Title"`; split when the separator is present
fn to_candidate(result: SearchResult) -> SearchCandidate {
    let (artist, title) = match result.title.split_once(" - ") {
        Some((artist, title)) => (Some(artist.trim().to_string()), title.trim().to_string()),
        None => (None, result.title.clone()),
    };

    SearchCandidate {
        external_id: result.id,
        title,
        artist,
        year: result.year,
        image_url: result.cover_image,
        thumb_url: result.thumb,
        uri: result.uri,
        genres: result.genre.unwrap_or_default(),
        styles: result.style.unwrap_or_default(),
        ..Default::default()
    }
}

pub(crate) fn normalize_base_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(LookupError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(LookupError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}

pub(crate) async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body
    };

    Err(LookupError::Upstream {
        status: status.as_u16(),
        message,
    })
}
