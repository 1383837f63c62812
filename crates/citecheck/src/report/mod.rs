//! Report renderers.
//!
//! Serializers over verification results; no decisions are made here. Three
//! formats: plain text, a JSON dump of the result aggregates, and Markdown.

pub mod markdown;
pub mod text;

pub use markdown::render_markdown;
pub use text::render_text;

use crate::models::{OverallStatus, VerificationResult};

/// Render results as pretty-printed JSON.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn render_json(results: &[VerificationResult]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Count of results carrying the given status.
#[must_use]
pub fn count_status(results: &[VerificationResult], status: OverallStatus) -> usize {
    results.iter().filter(|r| r.status() == status).count()
}

/// Results carrying the given status, report order.
#[must_use]
pub fn with_status<'a>(
    results: &'a [VerificationResult],
    status: OverallStatus,
) -> Vec<&'a VerificationResult> {
    results.iter().filter(|r| r.status() == status).collect()
}

/// Severity label for a status, as shown in report summaries.
#[must_use]
pub const fn severity(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Fabricated | OverallStatus::IdentifierInvalid => "CRITICAL",
        OverallStatus::Suspicious => "HIGH",
        OverallStatus::Warning => "MEDIUM",
        OverallStatus::Verified => "OK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels() {
        assert_eq!(severity(OverallStatus::Fabricated), "CRITICAL");
        assert_eq!(severity(OverallStatus::IdentifierInvalid), "CRITICAL");
        assert_eq!(severity(OverallStatus::Suspicious), "HIGH");
        assert_eq!(severity(OverallStatus::Warning), "MEDIUM");
        assert_eq!(severity(OverallStatus::Verified), "OK");
    }

    #[test]
    fn test_render_json_empty() {
        let json = render_json(&[]).unwrap();
        assert_eq!(json, "[]");
    }
}
