//! Review retrieval for a resolved place.

use chrono::DateTime;
use revsense_core::{PlaceOverview, RawReview, ResolvedBusiness, ReviewMetadata};

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{PlaceDetails, PlaceReview};

/// Reviews for one place plus its place-level summary.
///
/// An empty `reviews` list is a valid outcome: the place exists but has no
/// reviews.
#[derive(Debug, Clone)]
pub struct FetchedReviews {
    pub place: PlaceOverview,
    pub reviews: Vec<RawReview>,
}

impl PlacesClient {
    /// Fetches the review set for a resolved business.
    ///
    /// # Errors
    ///
    /// Propagates any [`PlacesError`] from the details call.
    pub async fn fetch_reviews(
        &self,
        business: &ResolvedBusiness,
    ) -> Result<FetchedReviews, PlacesError> {
        let details = self.place_details(&business.id).await?;
        let fetched = into_fetched(business, details);
        tracing::info!(
            place_id = %business.id,
            review_count = fetched.reviews.len(),
            "fetched reviews"
        );
        Ok(fetched)
    }
}

fn into_fetched(business: &ResolvedBusiness, details: PlaceDetails) -> FetchedReviews {
    let name = details
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| business.display_name.clone());
    FetchedReviews {
        place: PlaceOverview {
            name,
            rating: details.rating,
            user_ratings_total: details.user_ratings_total,
        },
        reviews: details.reviews.into_iter().map(into_raw_review).collect(),
    }
}

fn into_raw_review(review: PlaceReview) -> RawReview {
    RawReview {
        text: review.text.unwrap_or_default(),
        metadata: ReviewMetadata {
            author_name: review.author_name,
            author_rating: review.rating,
            relative_time: review.relative_time_description,
            published_at: review.time.and_then(|t| DateTime::from_timestamp(t, 0)),
            language: review.language,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business() -> ResolvedBusiness {
        ResolvedBusiness {
            id: "place-1".to_owned(),
            display_name: "Search Title".to_owned(),
            address: None,
        }
    }

    #[test]
    fn missing_text_becomes_empty_string() {
        let raw = into_raw_review(PlaceReview::default());
        assert_eq!(raw.text, "");
        assert_eq!(raw.metadata, ReviewMetadata::default());
    }

    #[test]
    fn metadata_is_carried_over() {
        let raw = into_raw_review(PlaceReview {
            text: Some("Lovely".to_owned()),
            author_name: Some("Rahim".to_owned()),
            rating: Some(5),
            relative_time_description: Some("a week ago".to_owned()),
            time: Some(1_700_000_000),
            language: Some("en".to_owned()),
        });
        assert_eq!(raw.text, "Lovely");
        assert_eq!(raw.metadata.author_rating, Some(5));
        assert_eq!(
            raw.metadata.published_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn details_name_falls_back_to_search_title() {
        let fetched = into_fetched(&business(), PlaceDetails::default());
        assert_eq!(fetched.place.name, "Search Title");
        assert!(fetched.reviews.is_empty());
    }

    #[test]
    fn review_order_is_preserved() {
        let details = PlaceDetails {
            name: Some("Details Name".to_owned()),
            rating: Some(4.3),
            user_ratings_total: Some(812),
            reviews: ["one", "two", "three"]
                .iter()
                .map(|t| PlaceReview {
                    text: Some((*t).to_owned()),
                    ..PlaceReview::default()
                })
                .collect(),
        };
        let fetched = into_fetched(&business(), details);
        assert_eq!(fetched.place.name, "Details Name");
        assert_eq!(fetched.place.user_ratings_total, Some(812));
        let texts: Vec<_> = fetched.reviews.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }
}
