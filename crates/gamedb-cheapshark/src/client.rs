//! HTTP client for the CheapShark games API.
//!
//! Wraps `reqwest` with typed response deserialization. There is no retry or
//! backoff: a transport failure surfaces immediately to the caller.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::CheapsharkError;
use crate::types::GameLookup;

const DEFAULT_BASE_URL: &str = "https://www.cheapshark.com/api/1.0/";

/// Client for the CheapShark REST API.
///
/// Use [`CheapsharkClient::new`] for production or
/// [`CheapsharkClient::with_base_url`] to point at a mock server in tests.
pub struct CheapsharkClient {
    client: Client,
    base_url: Url,
}

impl CheapsharkClient {
    /// Creates a new client pointed at the production CheapShark API.
    ///
    /// # Errors
    ///
    /// Returns [`CheapsharkError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, CheapsharkError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CheapsharkError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CheapsharkError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, CheapsharkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("gamedb/0.1 (deal-tracking)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so that
        // join() appends a path segment rather than replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| CheapsharkError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self { client, base_url })
    }

    /// Looks up a single game: metadata, current store deals, and the lowest
    /// recorded price.
    ///
    /// Calls the `games` endpoint with `?id=...`.
    ///
    /// # Errors
    ///
    /// - [`CheapsharkError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CheapsharkError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn game_lookup(&self, game_id: &str) -> Result<GameLookup, CheapsharkError> {
        let mut url = self
            .base_url
            .join("games")
            .map_err(|_| CheapsharkError::InvalidBaseUrl(self.base_url.to_string()))?;
        url.query_pairs_mut().append_pair("id", game_id);

        tracing::debug!(%url, "cheapshark game lookup");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: serde_json::Value = response.json().await?;

        serde_json::from_value(body).map_err(|e| CheapsharkError::Deserialize {
            context: format!("games(id={game_id})"),
            source: e,
        })
    }
}
