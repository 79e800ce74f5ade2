//! Plain-text rendering of analysis reports and errors.

use revsense_core::SentimentLabel;
use revsense_sentiment::{AnalysisError, AnalysisReport};

const BAR_WIDTH: usize = 20;

/// Renders the report as the text printed by `revsense analyze`.
pub(crate) fn render_report(report: &AnalysisReport) -> String {
    let mut lines = vec![report.message.clone()];

    if let Some(rating) = report.place.rating {
        let line = match report.place.user_ratings_total {
            Some(total) => format!("Google rating: {rating:.1} from {total} ratings"),
            None => format!("Google rating: {rating:.1}"),
        };
        lines.push(line);
    }

    if let Some(warning) = &report.warning {
        lines.push(String::new());
        lines.push(capitalize(warning.message));
        return finish(lines);
    }

    lines.push(String::new());
    for label in SentimentLabel::ALL {
        let share = match label {
            SentimentLabel::Positive => report.shares.positive,
            SentimentLabel::Average => report.shares.average,
            SentimentLabel::Negative => report.shares.negative,
        };
        lines.push(format!(
            "{:<10}{:>5}  {}  {share:>5.1}%",
            label.to_string(),
            report.counts.get(label),
            bar(share, BAR_WIDTH),
        ));
    }

    if !report.samples.is_empty() {
        lines.push(String::new());
        lines.push("Sample reviews:".to_owned());
        for sample in &report.samples {
            lines.push(format!("  {}: {}", sample.headline(), sample.text));
        }
    }

    finish(lines)
}

/// User-facing message for each failure kind.
pub(crate) fn error_message(err: &AnalysisError) -> String {
    match err {
        AnalysisError::Validation(_) => "Please enter a business name.".to_owned(),
        AnalysisError::NotFound { .. } => {
            "Business not found. Try refining the name or adding --location.".to_owned()
        }
        AnalysisError::Ambiguous { suggestions } if suggestions.is_empty() => {
            "No exact match. Try a more specific name.".to_owned()
        }
        AnalysisError::Ambiguous { suggestions } => {
            format!("No exact match. Did you mean: {}?", suggestions.join(", "))
        }
        AnalysisError::Search(_) => "Business search failed.".to_owned(),
        AnalysisError::Fetch(_) => "Could not fetch reviews for this business.".to_owned(),
        AnalysisError::Classification(_) => "The sentiment model failed.".to_owned(),
        AnalysisError::TimedOut { stage } => {
            format!("Analysis timed out before the {stage} stage.")
        }
    }
}

pub(crate) fn error_json(err: &AnalysisError, message: &str) -> serde_json::Value {
    let mut body = serde_json::json!({
        "error": {
            "code": err.code(),
            "message": message,
        }
    });
    if let AnalysisError::Ambiguous { suggestions } = err {
        body["error"]["suggestions"] = serde_json::json!(suggestions);
    }
    body
}

/// `share` is a percentage in `[0, 100]`.
fn bar(share: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
