//! Markdown report.

use crate::fixes::suggest_fixes;
use crate::models::{OverallStatus, VerificationResult};
use crate::report::{count_status, severity, with_status};

/// Render the Markdown verification report.
#[must_use]
pub fn render_markdown(results: &[VerificationResult]) -> String {
    let mut out = String::new();

    out.push_str("# Citation Verification Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}  \n**Total Citations Verified:** {}\n\n---\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        results.len()
    ));

    summary_section(&mut out, results);
    findings_section(&mut out, results);
    detail_section(&mut out, results);
    recommendations_section(&mut out, results);

    out
}

fn summary_section(out: &mut String, results: &[VerificationResult]) {
    out.push_str("## Executive Summary\n\n");
    out.push_str("| Status | Count | Percentage | Severity |\n");
    out.push_str("|--------|-------|------------|----------|\n");

    for status in OverallStatus::SEVERITY_ORDER {
        let count = count_status(results, status);
        if count > 0 {
            let percentage = 100.0 * count as f64 / results.len() as f64;
            out.push_str(&format!(
                "| **{status}** | {count} | {percentage:.1}% | {} |\n",
                severity(status)
            ));
        }
    }

    out.push_str("\n---\n\n");
}

fn findings_section(out: &mut String, results: &[VerificationResult]) {
    out.push_str("## Key Findings\n\n");

    let fabricated = count_status(results, OverallStatus::Fabricated);
    let invalid = count_status(results, OverallStatus::IdentifierInvalid);
    let suspicious = count_status(results, OverallStatus::Suspicious);
    let verified = count_status(results, OverallStatus::Verified);

    if fabricated > 0 {
        out.push_str(&format!(
            "- **{fabricated} FABRICATED citations detected**: authors do not match the \
             actual papers\n"
        ));
    }
    if invalid > 0 {
        out.push_str(&format!(
            "- **{invalid} invalid identifiers**: citations reference non-existent papers\n"
        ));
    }
    if suspicious > 0 {
        out.push_str(&format!(
            "- **{suspicious} SUSPICIOUS citations**: multiple discrepancies found\n"
        ));
    }
    if verified > 0 {
        out.push_str(&format!("- **{verified} citations verified** as authentic\n"));
    }

    if !results.is_empty() {
        let flagged = fabricated + invalid + suspicious;
        let rate = 100.0 * flagged as f64 / results.len() as f64;
        out.push_str(&format!("\n**Overall Fraud/Error Rate:** {rate:.1}%\n"));
    }

    out.push_str("\n---\n\n");
}

fn detail_section(out: &mut String, results: &[VerificationResult]) {
    out.push_str("## Detailed Findings\n\n");

    for status in OverallStatus::SEVERITY_ORDER {
        let group = with_status(results, status);
        if group.is_empty() {
            continue;
        }

        out.push_str(&format!("### {status} ({} citations)\n\n", group.len()));

        for (index, result) in group.iter().enumerate() {
            out.push_str(&format!("#### {}. `{}`\n\n", index + 1, result.key));
            claimed_block(out, result);
            issues_block(out, result);
            actual_block(out, result);
            fixes_block(out, result);
            out.push_str("---\n\n");
        }
    }
}

fn claimed_block(out: &mut String, result: &VerificationResult) {
    let claimed = &result.claimed;
    out.push_str("**Claimed Information:**\n\n");
    out.push_str(&format!("- **Title:** {}\n", claimed.title));
    out.push_str(&format!("- **Authors:** {}\n", author_list(&claimed.authors)));
    out.push_str(&format!("- **Year:** {}\n", claimed.year));
    out.push_str(&format!(
        "- **DOI:** `{}`\n",
        if claimed.doi.is_empty() { "N/A" } else { &claimed.doi }
    ));
    out.push_str(&format!("- **Venue:** {}\n", claimed.venue));
    out.push_str(&format!("- **Type:** {}\n\n", result.entry_type));
}

fn issues_block(out: &mut String, result: &VerificationResult) {
    if !result.issues.is_empty() {
        out.push_str("**Issues Detected:**\n\n");
        for issue in &result.issues {
            out.push_str(&format!("- {issue}\n"));
        }
        out.push('\n');
    }

    if !result.notes.is_empty() {
        out.push_str("**Notes:**\n\n");
        for note in &result.notes {
            out.push_str(&format!("- {note}\n"));
        }
        out.push('\n');
    }
}

fn actual_block(out: &mut String, result: &VerificationResult) {
    let Some(meta) = result.primary_metadata() else {
        return;
    };

    out.push_str("<details>\n<summary><b>Actual Information (from CrossRef)</b></summary>\n\n");
    out.push_str(&format!("- **Title:** {}\n", meta.title.as_deref().unwrap_or("N/A")));
    out.push_str(&format!("- **Authors:** {}\n", author_list(&meta.authors)));
    out.push_str(&format!(
        "- **Year:** {}\n",
        meta.year.map_or_else(|| "N/A".to_string(), |y| y.to_string())
    ));
    out.push_str(&format!("- **DOI:** `{}`\n", meta.doi.as_deref().unwrap_or("N/A")));
    out.push_str(&format!("- **Venue:** {}\n", meta.venue.as_deref().unwrap_or("N/A")));
    out.push_str("\n</details>\n\n");
}

fn fixes_block(out: &mut String, result: &VerificationResult) {
    if result.issues.is_empty() {
        return;
    }

    let fixes = suggest_fixes(result);
    if !fixes.has_fixes {
        return;
    }

    out.push_str("**Suggested Fixes:**\n\n");
    if let Some(authors) = &fixes.suggested_authors {
        out.push_str(&format!("- **Corrected Authors:** {}\n", author_list(authors)));
    }
    if let Some(doi) = &fixes.suggested_doi {
        out.push_str(&format!("- **Corrected DOI:** `{doi}`\n"));
    }
    if let Some(title) = &fixes.suggested_title {
        out.push_str(&format!("- **Corrected Title:** {title}\n"));
    }
    if let Some(year) = &fixes.suggested_year {
        out.push_str(&format!("- **Corrected Year:** {year}\n"));
    }

    if let Some(entry) = &fixes.corrected_entry {
        out.push_str("\n<details>\n<summary><b>Corrected BibTeX Entry</b></summary>\n\n");
        out.push_str("```bibtex\n");
        out.push_str(entry);
        out.push_str("\n```\n\n</details>\n");
    }
    out.push('\n');
}

fn recommendations_section(out: &mut String, results: &[VerificationResult]) {
    let fabricated = with_status(results, OverallStatus::Fabricated);
    let invalid = with_status(results, OverallStatus::IdentifierInvalid);

    if fabricated.is_empty() && invalid.is_empty() {
        return;
    }

    out.push_str("## Recommendations\n\n");

    if !fabricated.is_empty() {
        out.push_str("### Critical Actions Required\n\n");
        out.push_str("The following citations have fabricated author information:\n\n");
        for result in &fabricated {
            out.push_str(&format!("- `{}` - {}\n", result.key, result.claimed.title));
        }
        out.push_str("\n**Action:** correct or remove these citations immediately.\n\n");
    }

    if !invalid.is_empty() {
        out.push_str("### Invalid Identifier References\n\n");
        out.push_str("The following citations have DOIs that do not exist:\n\n");
        for result in &invalid {
            out.push_str(&format!("- `{}` - DOI: `{}`\n", result.key, result.claimed.doi));
        }
        out.push_str("\n**Action:** verify these DOIs or find alternative references.\n");
    }
}

/// First five authors, with a count of the rest.
fn author_list(authors: &[String]) -> String {
    if authors.len() <= 5 {
        authors.join(", ")
    } else {
        format!("{} (+{} more)", authors[..5].join(", "), authors.len() - 5)
    }
}
