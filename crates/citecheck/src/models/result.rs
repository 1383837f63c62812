//! The per-entry verification aggregate and its status algebra.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bibtex::CitationEntry;
use crate::models::record::SourceRecord;
use crate::textmatch::{AuthorClassification, AuthorComparison, parse_authors};

/// The entry's claims, as parsed from its fields.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimedMetadata {
    pub title: String,

    /// Normalized author names, citation order preserved.
    pub authors: Vec<String>,

    pub year: String,

    pub doi: String,

    /// `journal` if present, else `booktitle`.
    pub venue: String,
}

impl ClaimedMetadata {
    /// Derive the claimed view from a parsed entry.
    #[must_use]
    pub fn from_entry(entry: &CitationEntry) -> Self {
        Self {
            title: entry.field("title").unwrap_or_default().to_string(),
            authors: parse_authors(entry.field("author").unwrap_or_default()),
            year: entry.field("year").unwrap_or_default().to_string(),
            doi: entry.field("doi").unwrap_or_default().to_string(),
            venue: entry
                .field("journal")
                .or_else(|| entry.field("booktitle"))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Which registry confirmed the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierSource {
    /// CrossRef, with full metadata.
    Primary,

    /// doi.org handle resolution, existence only.
    Secondary,
}

/// Terminal classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Verified,
    Warning,
    Suspicious,
    Fabricated,
    IdentifierInvalid,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Verified => "VERIFIED",
            Self::Warning => "WARNING",
            Self::Suspicious => "SUSPICIOUS",
            Self::Fabricated => "FABRICATED",
            Self::IdentifierInvalid => "IDENTIFIER_INVALID",
        };
        f.write_str(name)
    }
}

impl OverallStatus {
    /// Statuses ordered most to least severe, for report grouping.
    pub const SEVERITY_ORDER: [Self; 5] =
        [Self::Fabricated, Self::IdentifierInvalid, Self::Suspicious, Self::Warning, Self::Verified];
}

/// One recorded discrepancy.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// Claimed authors did not match the primary record.
    AuthorMismatch { classification: AuthorClassification },

    /// Title similarity at or below the 0.80 threshold.
    TitleMismatch { similarity: f64 },

    /// Claimed year differs from the primary record.
    YearMismatch { claimed: String, actual: String },

    /// Identifier absent from both the primary and the secondary registry.
    IdentifierNotFound,

    /// Entry claimed no identifier but the search found one.
    IdentifierMissing { actual: String },

    /// Claimed identifier differs from the one the search found.
    IdentifierWrong { claimed: String, actual: String },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorMismatch { classification } => {
                write!(f, "AUTHOR_MISMATCH: {classification}")
            }
            Self::TitleMismatch { similarity } => {
                write!(f, "TITLE_MISMATCH: similarity={similarity:.2}")
            }
            Self::YearMismatch { claimed, actual } => {
                write!(f, "YEAR_MISMATCH: claimed={claimed}, actual={actual}")
            }
            Self::IdentifierNotFound => {
                write!(f, "IDENTIFIER_NOT_FOUND: not found in either source - likely invalid")
            }
            Self::IdentifierMissing { actual } => write!(f, "IDENTIFIER_MISSING: actual={actual}"),
            Self::IdentifierWrong { claimed, actual } => {
                write!(f, "IDENTIFIER_WRONG: claimed={claimed}, actual={actual}")
            }
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classify an issue list. Pure: identical issue lists always yield the same
/// status. Priority is fabrication, then a dead identifier, then the
/// two-or-more threshold; the precedence is deliberate.
#[must_use]
pub fn overall_status(issues: &[Issue]) -> OverallStatus {
    if issues.is_empty() {
        OverallStatus::Verified
    } else if issues.iter().any(|i| {
        matches!(
            i,
            Issue::AuthorMismatch { classification: AuthorClassification::FabricatedAuthors }
        )
    }) {
        OverallStatus::Fabricated
    } else if issues.iter().any(|i| matches!(i, Issue::IdentifierNotFound)) {
        OverallStatus::IdentifierInvalid
    } else if issues.len() >= 2 {
        OverallStatus::Suspicious
    } else {
        OverallStatus::Warning
    }
}

/// Per-check verdicts. `None` means the check could not run (no identifier,
/// or the lookup failed), never that it failed.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub identifier_valid: Option<bool>,

    pub identifier_source: Option<IdentifierSource>,

    pub authors_match: Option<AuthorComparison>,

    pub title_match: Option<bool>,

    pub year_match: Option<bool>,

    pub overall_status: OverallStatus,
}

/// Everything the run learned about one entry.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub key: String,

    pub entry_type: String,

    pub claimed: ClaimedMetadata,

    pub verification: Verification,

    /// Discrepancies, in the order the checks ran.
    pub issues: Vec<Issue>,

    /// Informational remarks that are not discrepancies.
    pub notes: Vec<String>,

    /// Source name -> what the call left behind.
    pub actual_data: BTreeMap<String, SourceRecord>,

    /// Verbatim entry fields, for reconstruction.
    pub original_fields: BTreeMap<String, String>,
}

impl VerificationResult {
    /// The CrossRef metadata record, when the primary lookup succeeded.
    #[must_use]
    pub fn primary_metadata(&self) -> Option<&crate::models::SourceMetadata> {
        self.actual_data.get(crate::client::SOURCE_CROSSREF).and_then(SourceRecord::metadata)
    }

    /// The overall status, shorthand for the nested field.
    #[must_use]
    pub const fn status(&self) -> OverallStatus {
        self.verification.overall_status
    }
}
