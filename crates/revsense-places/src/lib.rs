//! Google Places client for revsense.
//!
//! Resolves a free-text business query to a `place_id` via Text Search and
//! fetches that place's reviews via Place Details.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod resolver;
pub mod types;

mod retry;

pub use client::PlacesClient;
pub use error::{PlacesError, ResolveError};
pub use fetcher::FetchedReviews;
pub use resolver::{select_candidate, MAX_SUGGESTIONS};
pub use types::{PlaceCandidate, PlaceDetails, PlaceReview};
