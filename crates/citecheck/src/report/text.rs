//! Plain-text report.

use crate::models::{OverallStatus, VerificationResult};
use crate::report::{count_status, with_status};

const RULE: &str = "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Render the plain-text verification report.
#[must_use]
pub fn render_text(results: &[VerificationResult]) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "CITATION VERIFICATION REPORT".to_string(),
        RULE.to_string(),
        format!("Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        format!("Total Citations Verified: {}", results.len()),
        String::new(),
        "SUMMARY:".to_string(),
        THIN_RULE.to_string(),
    ];

    for status in OverallStatus::SEVERITY_ORDER {
        let count = count_status(results, status);
        if count > 0 {
            let percentage = 100.0 * count as f64 / results.len() as f64;
            lines.push(format!("  {:18}: {count:3} ({percentage:5.1}%)", status.to_string()));
        }
    }

    lines.extend([String::new(), RULE.to_string(), "DETAILED FINDINGS:".to_string(),
        RULE.to_string()]);

    for status in OverallStatus::SEVERITY_ORDER {
        let group = with_status(results, status);
        if group.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("{status} ({} citations)", group.len()));
        lines.push(RULE.to_string());

        for result in group {
            lines.push(String::new());
            lines.push(format!("[{}]", result.key));
            lines.push(format!("Type: {}", result.entry_type));
            lines.push(format!("Status: {status}"));
            lines.push(String::new());

            lines.push("CLAIMED:".to_string());
            lines.push(format!("  Title: {}", clip(&result.claimed.title, 100)));
            lines.push(format!("  Authors: {}", join_clipped(&result.claimed.authors, 3)));
            lines.push(format!("  Year: {}", result.claimed.year));
            lines.push(format!("  DOI: {}", result.claimed.doi));
            lines.push(format!("  Venue: {}", clip(&result.claimed.venue, 60)));
            lines.push(String::new());

            if !result.issues.is_empty() {
                lines.push("ISSUES:".to_string());
                for issue in &result.issues {
                    lines.push(format!("  ! {issue}"));
                }
                lines.push(String::new());
            }

            if !result.notes.is_empty() {
                lines.push("NOTES:".to_string());
                for note in &result.notes {
                    lines.push(format!("  - {note}"));
                }
                lines.push(String::new());
            }

            if let Some(meta) = result.primary_metadata() {
                lines.push("ACTUAL (from CrossRef):".to_string());
                lines.push(format!("  Title: {}", clip(meta.title.as_deref().unwrap_or("N/A"), 100)));
                lines.push(format!("  Authors: {}", join_clipped(&meta.authors, 3)));
                lines.push(format!(
                    "  Year: {}",
                    meta.year.map_or_else(|| "N/A".to_string(), |y| y.to_string())
                ));
                lines.push(format!("  DOI: {}", meta.doi.as_deref().unwrap_or("N/A")));
                lines.push(String::new());
            }

            lines.push(THIN_RULE.to_string());
        }
    }

    lines.join("\n")
}

/// First `max` characters of `s`, respecting char boundaries.
fn clip(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Join the first `max` items, appending a count of the rest.
fn join_clipped(items: &[String], max: usize) -> String {
    if items.len() <= max {
        items.join(", ")
    } else {
        format!("{} (+{} more)", items[..max].join(", "), items.len() - max)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{ClaimedMetadata, Issue, Verification};

    fn result_with_status(key: &str, issues: Vec<Issue>) -> VerificationResult {
        let status = crate::models::overall_status(&issues);
        VerificationResult {
            key: key.to_string(),
            entry_type: "article".to_string(),
            claimed: ClaimedMetadata {
                title: "Some Title".to_string(),
                authors: vec!["a b".to_string()],
                year: "2020".to_string(),
                doi: "10.1/x".to_string(),
                venue: "V".to_string(),
            },
            verification: Verification {
                identifier_valid: None,
                identifier_source: None,
                authors_match: None,
                title_match: None,
                year_match: None,
                overall_status: status,
            },
            issues,
            notes: Vec::new(),
            actual_data: BTreeMap::new(),
            original_fields: BTreeMap::new(),
        }
    }

    #[test]
    fn test_text_report_groups_by_status() {
        let results = vec![
            result_with_status("ok1", vec![]),
            result_with_status("bad1", vec![Issue::IdentifierNotFound]),
        ];
        let report = render_text(&results);

        assert!(report.contains("CITATION VERIFICATION REPORT"));
        assert!(report.contains("Total Citations Verified: 2"));
        assert!(report.contains("[ok1]"));
        assert!(report.contains("[bad1]"));
        // Invalid identifiers are reported before clean entries.
        assert!(report.find("[bad1]").unwrap() < report.find("[ok1]").unwrap());
    }

    #[test]
    fn test_text_report_lists_issues() {
        let results = vec![result_with_status("k", vec![Issue::IdentifierNotFound])];
        let report = render_text(&results);
        assert!(report.contains("IDENTIFIER_NOT_FOUND"));
    }

    #[test]
    fn test_join_clipped() {
        let items: Vec<String> =
            ["a", "b", "c", "d"].iter().map(ToString::to_string).collect();
        assert_eq!(join_clipped(&items, 3), "a, b, c (+1 more)");
        assert_eq!(join_clipped(&items[..2], 3), "a, b");
    }
}
