use thiserror::Error;

/// Errors returned by the Places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-`OK` envelope status.
    #[error("Places API error {status}: {message}")]
    ApiError { status: String, message: String },

    /// `OVER_QUERY_LIMIT`: the key's quota or billing limit is exhausted.
    #[error("Places API quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("details response for {place_id} has no result")]
    MissingResult { place_id: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Why a query could not be turned into a single place.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no places matched '{query}'")]
    NotFound { query: String },

    /// Candidates came back but none carried a `place_id`.
    #[error("ambiguous match; did you mean: {}", .suggestions.join(", "))]
    Ambiguous { suggestions: Vec<String> },

    #[error(transparent)]
    Provider(#[from] PlacesError),
}
