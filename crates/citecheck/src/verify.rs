//! The verification engine.
//!
//! Per entry: resolve the claimed DOI against CrossRef, falling back to the
//! doi.org Handle System; when neither confirms the identifier (or none was
//! claimed), corroborate by title search. Comparisons of authors, title and
//! year run only against sources that carry full metadata. All lookup
//! failures degrade the affected check to unknown; a single entry's failures
//! never abort the batch.

use std::collections::BTreeMap;

use crate::bibtex::CitationEntry;
use crate::client::{CitationClient, SOURCE_CROSSREF, SOURCE_DOI_ORG, SOURCE_SCHOLAR};
use crate::config::Config;
use crate::models::{
    ClaimedMetadata, IdentifierSource, Issue, SourceRecord, Verification, VerificationResult,
    overall_status,
};
use crate::textmatch::{compare_authors, similarity_ratio};

/// Title similarity above this counts as a match.
const TITLE_MATCH_THRESHOLD: f64 = 0.8;

/// Verifies citations against the metadata sources.
#[derive(Debug)]
pub struct Verifier {
    client: CitationClient,
}

impl Verifier {
    /// Create a verifier with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self { client: CitationClient::new(config)? })
    }

    /// Verify entries sequentially, in order. Each entry's fallback chain
    /// runs to completion before the next entry starts.
    pub async fn verify_all(&self, entries: &[CitationEntry]) -> Vec<VerificationResult> {
        let total = entries.len();
        let mut results = Vec::with_capacity(total);

        for (index, entry) in entries.iter().enumerate() {
            tracing::info!(key = %entry.key, "verifying citation {}/{total}", index + 1);
            let result = self.verify_entry(entry).await;
            tracing::info!(key = %entry.key, status = %result.status(), "classified");
            results.push(result);
        }

        results
    }

    /// Verify a single entry.
    pub async fn verify_entry(&self, entry: &CitationEntry) -> VerificationResult {
        let claimed = ClaimedMetadata::from_entry(entry);

        let mut issues: Vec<Issue> = Vec::new();
        let mut notes: Vec<String> = Vec::new();
        let mut actual_data: BTreeMap<String, SourceRecord> = BTreeMap::new();

        let mut identifier_valid: Option<bool> = None;
        let mut identifier_source: Option<IdentifierSource> = None;
        let mut authors_match = None;
        let mut title_match = None;
        let mut year_match = None;

        // 1. Identifier chain: CrossRef first, doi.org as fallback.
        if !claimed.doi.is_empty() {
            match self.client.crossref_work(&claimed.doi).await {
                Ok(meta) => {
                    identifier_valid = Some(true);
                    identifier_source = Some(IdentifierSource::Primary);

                    let comparison = compare_authors(&claimed.authors, &meta.authors);
                    if !comparison.is_match {
                        issues.push(Issue::AuthorMismatch {
                            classification: comparison.classification,
                        });
                    }
                    authors_match = Some(comparison);

                    if let Some(actual_title) = &meta.title {
                        let similarity = similarity_ratio(&claimed.title, actual_title);
                        let matched = similarity > TITLE_MATCH_THRESHOLD;
                        title_match = Some(matched);
                        if !matched {
                            issues.push(Issue::TitleMismatch { similarity });
                        }
                    }

                    if let Some(actual_year) = meta.year {
                        let actual_year = actual_year.to_string();
                        let matched = actual_year == claimed.year;
                        year_match = Some(matched);
                        if !matched {
                            issues.push(Issue::YearMismatch {
                                claimed: claimed.year.clone(),
                                actual: actual_year,
                            });
                        }
                    }

                    actual_data.insert(SOURCE_CROSSREF.to_string(), SourceRecord::Metadata(meta));
                }
                Err(primary_err) => {
                    tracing::debug!(doi = %claimed.doi, error = %primary_err,
                        "CrossRef lookup failed, trying doi.org");

                    match self.client.handle_lookup(&claimed.doi).await {
                        Ok(handle) => {
                            // Existence only: the handle registry carries no
                            // author/title/year metadata to corroborate.
                            identifier_valid = Some(true);
                            identifier_source = Some(IdentifierSource::Secondary);
                            notes.push(
                                "identifier verified via doi.org Handle System (not indexed \
                                 by CrossRef, e.g. an arXiv preprint)"
                                    .to_string(),
                            );
                            actual_data
                                .insert(SOURCE_DOI_ORG.to_string(), SourceRecord::Handle(handle));
                        }
                        Err(secondary_err) => {
                            identifier_valid = Some(false);
                            issues.push(Issue::IdentifierNotFound);
                            actual_data.insert(
                                SOURCE_CROSSREF.to_string(),
                                SourceRecord::Failure((&primary_err).into()),
                            );
                            actual_data.insert(
                                SOURCE_DOI_ORG.to_string(),
                                SourceRecord::Failure((&secondary_err).into()),
                            );
                        }
                    }
                }
            }
        }

        // 2. Title search fallback, when no registry confirmed the
        // identifier (or none was claimed).
        if identifier_valid != Some(true) && !claimed.title.is_empty() {
            match self.client.scholar_search(&claimed.title).await {
                Ok(meta) => {
                    if let Some(found) = meta.doi.clone() {
                        if claimed.doi.is_empty() {
                            issues.push(Issue::IdentifierMissing { actual: found });
                        } else if !found.eq_ignore_ascii_case(&claimed.doi) {
                            issues.push(Issue::IdentifierWrong {
                                claimed: claimed.doi.clone(),
                                actual: found,
                            });
                        }
                    }

                    if authors_match.is_none() && !meta.authors.is_empty() {
                        let comparison = compare_authors(&claimed.authors, &meta.authors);
                        if !comparison.is_match {
                            issues.push(Issue::AuthorMismatch {
                                classification: comparison.classification,
                            });
                        }
                        authors_match = Some(comparison);
                    }

                    actual_data.insert(SOURCE_SCHOLAR.to_string(), SourceRecord::Metadata(meta));
                }
                Err(err) => {
                    // Absence of corroboration is not itself an issue.
                    tracing::debug!(key = %entry.key, error = %err, "title search failed");
                }
            }
        }

        let status = overall_status(&issues);

        VerificationResult {
            key: entry.key.clone(),
            entry_type: entry.entry_type.clone(),
            claimed,
            verification: Verification {
                identifier_valid,
                identifier_source,
                authors_match,
                title_match,
                year_match,
                overall_status: status,
            },
            issues,
            notes,
            actual_data,
            original_fields: entry.fields.clone(),
        }
    }
}
