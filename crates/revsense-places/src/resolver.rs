//! Business resolution: free-text query to a single `place_id`.

use revsense_core::{BusinessQuery, ResolvedBusiness};

use crate::client::PlacesClient;
use crate::error::ResolveError;
use crate::types::PlaceCandidate;

/// Maximum number of names carried by [`ResolveError::Ambiguous`].
pub const MAX_SUGGESTIONS: usize = 3;

impl PlacesClient {
    /// Resolves `query` to the first search candidate carrying a `place_id`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] when the search returns no candidates.
    /// - [`ResolveError::Ambiguous`] when no candidate carries a `place_id`.
    /// - [`ResolveError::Provider`] when the search call itself fails.
    pub async fn resolve_business(
        &self,
        query: &BusinessQuery,
    ) -> Result<ResolvedBusiness, ResolveError> {
        let search_text = query.search_text();
        let candidates = self.text_search(&search_text).await?;
        tracing::debug!(
            query = %search_text,
            candidates = candidates.len(),
            "text search returned"
        );

        let resolved = select_candidate(&search_text, &candidates)?;
        tracing::info!(
            query = %search_text,
            place_id = %resolved.id,
            name = %resolved.display_name,
            "resolved business"
        );
        Ok(resolved)
    }
}

/// Picks the first candidate, in provider order, that carries a usable
/// `place_id`. Candidates without one are skipped.
///
/// # Errors
///
/// [`ResolveError::NotFound`] for an empty slice; [`ResolveError::Ambiguous`]
/// with up to [`MAX_SUGGESTIONS`] titles when nothing qualifies.
pub fn select_candidate(
    query: &str,
    candidates: &[PlaceCandidate],
) -> Result<ResolvedBusiness, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NotFound {
            query: query.to_owned(),
        });
    }

    if let Some((candidate, id)) = candidates
        .iter()
        .find_map(|c| c.usable_id().map(|id| (c, id)))
    {
        return Ok(ResolvedBusiness {
            id: id.to_owned(),
            display_name: candidate.title().unwrap_or(id).to_owned(),
            address: candidate.formatted_address.clone(),
        });
    }

    let suggestions = candidates
        .iter()
        .filter_map(PlaceCandidate::title)
        .take(MAX_SUGGESTIONS)
        .map(ToOwned::to_owned)
        .collect();
    Err(ResolveError::Ambiguous { suggestions })
}
