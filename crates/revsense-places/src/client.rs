//! HTTP client for the Google Places Web Service.
//!
//! Wraps `reqwest` with Places-specific envelope handling, API key
//! management, and retry on transient failures. The key travels as a query
//! parameter, so URLs are stripped from transport errors before they surface.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ApiResponse, PlaceCandidate, PlaceDetails, PlaceDetailsResponse, TextSearchResponse,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Fields requested from Place Details.
const DETAILS_FIELDS: &str = "name,rating,review,user_ratings_total";

/// Client for the Places Text Search and Place Details endpoints.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    language: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            language: None,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::with_base_url`].
    pub fn from_app_config(config: &revsense_core::AppConfig) -> Result<Self, PlacesError> {
        Ok(Self::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms)
        .with_language(config.review_language.clone()))
    }

    /// Sets the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Sets the `language` parameter sent with detail requests.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Runs a Text Search and returns candidates in provider order.
    ///
    /// `ZERO_RESULTS` yields an empty `Vec`, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::QuotaExceeded`] on `OVER_QUERY_LIMIT`.
    /// - [`PlacesError::ApiError`] on any other non-`OK` status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn text_search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let url = self.build_url("textsearch/json", &[("query", query)])?;
        let envelope: ApiResponse<TextSearchResponse> =
            self.request_json(&url, "textsearch").await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;
        Ok(envelope.data.results)
    }

    /// Fetches name, rating, rating count, and reviews for one place.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::text_search`], plus [`PlacesError::MissingResult`]
    /// when an `OK` response has no `result` object.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let mut params = vec![("place_id", place_id), ("fields", DETAILS_FIELDS)];
        if let Some(language) = &self.language {
            params.push(("language", language.as_str()));
        }
        let url = self.build_url("details/json", &params)?;
        let envelope: ApiResponse<PlaceDetailsResponse> =
            self.request_json(&url, "details").await?;
        Self::check_status(&envelope.status, envelope.error_message.as_deref())?;

        match envelope.data.result {
            Some(details) => Ok(details),
            // ZERO_RESULTS on details means the place vanished between calls.
            None if envelope.status == "ZERO_RESULTS" => Ok(PlaceDetails::default()),
            None => Err(PlacesError::MissingResult {
                place_id: place_id.to_owned(),
            }),
        }
    }

    /// Builds the request URL with `key` first, then `extra` pairs, all
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with retry, asserts a 2xx status, and decodes the body.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let response = response
                .error_for_status()
                .map_err(reqwest::Error::without_url)?;
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }

    /// Maps the envelope `status` onto an error when it is not a success.
    pub(crate) fn check_status(status: &str, message: Option<&str>) -> Result<(), PlacesError> {
        let message = || message.unwrap_or("no error message").to_owned();
        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            "OVER_QUERY_LIMIT" => Err(PlacesError::QuotaExceeded(message())),
            other => Err(PlacesError::ApiError {
                status: other.to_owned(),
                message: message(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
