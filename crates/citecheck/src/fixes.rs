//! Fix suggestions for entries with issues.
//!
//! Pure functions over a [`VerificationResult`]. Only the primary registry
//! (CrossRef) is trusted for corrections; the handle registry and the title
//! search lack the metadata to correct from.

use serde::Serialize;

use crate::models::VerificationResult;

/// Canonical BibTeX field order for reconstructed entries. Fields not listed
/// here are appended alphabetically.
const FIELD_ORDER: &[&str] = &[
    "author",
    "title",
    "booktitle",
    "journal",
    "year",
    "month",
    "volume",
    "number",
    "pages",
    "publisher",
    "address",
    "organization",
    "editor",
    "series",
    "edition",
    "chapter",
    "note",
    "doi",
    "url",
    "isbn",
    "issn",
    "eprint",
    "archiveprefix",
    "primaryclass",
];

/// Proposed corrections for one entry. Derived on demand, never stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixSuggestion {
    /// True iff at least one suggestion was produced.
    pub has_fixes: bool,

    pub suggested_authors: Option<Vec<String>>,

    pub suggested_doi: Option<String>,

    pub suggested_title: Option<String>,

    pub suggested_year: Option<String>,

    /// Corrected BibTeX entry, present when there is anything to fix.
    pub corrected_entry: Option<String>,
}

/// Propose corrections from the primary registry's record.
#[must_use]
pub fn suggest_fixes(result: &VerificationResult) -> FixSuggestion {
    let mut fixes = FixSuggestion::default();

    let Some(meta) = result.primary_metadata() else {
        return fixes;
    };

    if let Some(comparison) = &result.verification.authors_match {
        if !comparison.is_match && !meta.authors.is_empty() {
            fixes.has_fixes = true;
            fixes.suggested_authors = Some(meta.authors.clone());
        }
    }

    if let Some(actual_doi) = &meta.doi {
        let claimed_doi = &result.claimed.doi;
        if claimed_doi.is_empty() || !claimed_doi.eq_ignore_ascii_case(actual_doi) {
            fixes.has_fixes = true;
            fixes.suggested_doi = Some(actual_doi.clone());
        }
    }

    if result.verification.title_match == Some(false) {
        fixes.has_fixes = true;
        fixes.suggested_title = meta.title.clone();
    }

    if result.verification.year_match == Some(false) {
        fixes.has_fixes = true;
        fixes.suggested_year = meta.year.map(|y| y.to_string());
    }

    if fixes.has_fixes {
        fixes.corrected_entry = Some(reconstruct_entry(result, &fixes));
    }

    fixes
}

/// Rebuild the entry with fixes applied: every original field preserved
/// verbatim except the overridden ones, canonical field order first, any
/// remaining fields alphabetically.
#[must_use]
pub fn reconstruct_entry(result: &VerificationResult, fixes: &FixSuggestion) -> String {
    let mut fields = result.original_fields.clone();

    if let Some(authors) = &fixes.suggested_authors {
        fields.insert("author".to_string(), bibtex_author_string(authors));
    }
    if let Some(title) = &fixes.suggested_title {
        fields.insert("title".to_string(), title.clone());
    }
    if let Some(year) = &fixes.suggested_year {
        fields.insert("year".to_string(), year.clone());
    }
    if let Some(doi) = &fixes.suggested_doi {
        fields.insert("doi".to_string(), doi.clone());
    }

    let mut lines = vec![format!("@{}{{{},", result.entry_type, result.key)];

    for name in FIELD_ORDER {
        if let Some(value) = fields.remove(*name) {
            lines.push(format!("  {name} = {{{value}}},"));
        }
    }

    // BTreeMap iteration keeps the leftovers alphabetical.
    for (name, value) in &fields {
        lines.push(format!("  {name} = {{{value}}},"));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// Join normalized names back into a BibTeX author string, "Last, First"
/// per author.
fn bibtex_author_string(authors: &[String]) -> String {
    authors
        .iter()
        .map(|name| {
            let words: Vec<&str> = name.split_whitespace().collect();
            match words.split_last() {
                Some((last, rest)) if !rest.is_empty() => format!("{last}, {}", rest.join(" ")),
                _ => name.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join(" and ")
}
