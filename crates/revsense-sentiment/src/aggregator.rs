//! Review aggregation: classify non-blank reviews and count labels.

use futures::{stream, StreamExt};
use revsense_core::{ClassifiedReview, RawReview, ReviewMetadata, SentimentSummary};

use crate::classifier::SentimentClassifier;
use crate::error::ClassificationError;

/// Classifies every review with non-blank text and summarizes the labels.
///
/// Blank reviews are skipped entirely. Up to `concurrency` classifications
/// run at once; each result lands in the slot of its input position, so the
/// output keeps provider order regardless of completion order.
///
/// **Fail-fast**: the first classification error aborts the aggregation and
/// drops any in-flight calls. No partial summary is returned.
///
/// # Errors
///
/// Returns the first [`ClassificationError`] encountered.
pub async fn aggregate(
    classifier: &SentimentClassifier,
    reviews: &[RawReview],
    concurrency: usize,
) -> Result<SentimentSummary, ClassificationError> {
    let pending: Vec<(String, ReviewMetadata)> = reviews
        .iter()
        .filter_map(|review| {
            let text = review.text.trim();
            (!text.is_empty()).then(|| (text.to_owned(), review.metadata.clone()))
        })
        .collect();

    let skipped = reviews.len() - pending.len();
    if skipped > 0 {
        tracing::debug!(skipped, "skipping reviews with blank text");
    }

    let mut slots: Vec<Option<ClassifiedReview>> = vec![None; pending.len()];

    // Futures own their inputs so the whole aggregation stays `Send`.
    let tasks: Vec<_> = pending
        .into_iter()
        .enumerate()
        .map(|(slot, (text, metadata))| async move {
            let classification = classifier.classify(&text).await?;
            Ok::<_, ClassificationError>((slot, classification.into_review(&text, metadata)))
        })
        .collect();

    let mut results = stream::iter(tasks).buffer_unordered(concurrency.max(1));
    while let Some(result) = results.next().await {
        let (slot, classified) = result?;
        slots[slot] = Some(classified);
    }

    let summary = SentimentSummary::new(slots.into_iter().flatten().collect());
    let counts = summary.counts();
    tracing::info!(
        classified = summary.reviews().len(),
        positive = counts.positive,
        average = counts.average,
        negative = counts.negative,
        "aggregated review sentiment"
    );
    Ok(summary)
}
