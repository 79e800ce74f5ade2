//! Places API response types.
//!
//! Models the legacy Places Web Service JSON. Every response carries a
//! `status` string and an optional `error_message`; [`ApiResponse`] captures
//! that envelope generically.

use serde::Deserialize;

/// Top-level envelope for Places responses.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

// ---------------------------------------------------------------------------
// textsearch
// ---------------------------------------------------------------------------

/// Wrapper for the Text Search response: `{ "results": [ ... ] }`.
///
/// `results` is absent on `ZERO_RESULTS`.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceCandidate>,
}

/// One search hit. Summary-only entries may lack a `place_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

impl PlaceCandidate {
    /// The `place_id`, if present and non-blank.
    #[must_use]
    pub fn usable_id(&self) -> Option<&str> {
        self.place_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Human-readable title: the name, else the address.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.formatted_address.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

/// Wrapper for the Place Details response: `{ "result": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    /// At most five reviews are returned by the provider.
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub language: Option<String>,
}
