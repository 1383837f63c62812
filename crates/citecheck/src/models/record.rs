//! Normalized source records, the engine-facing view of a lookup.

use serde::Serialize;

use crate::error::{FailureKind, LookupError};
use crate::models::provider::{CrossrefWork, HandleResponse, ScholarPaper};
use crate::textmatch::clean_author_name;

/// Full metadata from a source that carries it (CrossRef, Semantic Scholar).
#[derive(Debug, Clone, Serialize)]
pub struct SourceMetadata {
    pub doi: Option<String>,

    pub title: Option<String>,

    /// Normalized author names, byline order.
    pub authors: Vec<String>,

    pub year: Option<i64>,

    pub venue: Option<String>,

    /// Work type as reported by the source.
    pub kind: Option<String>,

    /// Unmodified provider payload, kept for report display.
    pub raw: serde_json::Value,
}

impl SourceMetadata {
    /// Build from a CrossRef work plus its raw `message` payload.
    #[must_use]
    pub fn from_crossref(work: &CrossrefWork, raw: serde_json::Value) -> Self {
        Self {
            doi: work.doi.clone(),
            title: work.title.first().cloned(),
            authors: work
                .author
                .iter()
                .map(|a| clean_author_name(&a.full_name()))
                .filter(|a| !a.is_empty())
                .collect(),
            year: work.year(),
            venue: work.venue(),
            kind: work.kind.clone(),
            raw,
        }
    }

    /// Build from a Semantic Scholar search hit plus its raw payload.
    #[must_use]
    pub fn from_scholar(paper: &ScholarPaper, raw: serde_json::Value) -> Self {
        Self {
            doi: paper.doi().map(ToString::to_string),
            title: paper.title.clone(),
            authors: paper
                .authors
                .iter()
                .filter_map(|a| a.name.as_deref())
                .map(clean_author_name)
                .filter(|a| !a.is_empty())
                .collect(),
            year: paper.year,
            venue: paper.venue.clone(),
            kind: None,
            raw,
        }
    }
}

/// Existence record from the handle registry; carries no bibliographic
/// metadata beyond the resolved target.
#[derive(Debug, Clone, Serialize)]
pub struct HandleRecord {
    pub exists: bool,

    pub handle: Option<String>,

    pub resolved_url: Option<String>,

    /// Unmodified provider payload.
    pub raw: serde_json::Value,
}

impl HandleRecord {
    /// Build from a successful handle resolution plus its raw payload.
    #[must_use]
    pub fn from_response(resp: &HandleResponse, raw: serde_json::Value) -> Self {
        Self {
            exists: resp.response_code == 1,
            handle: resp.handle.clone(),
            resolved_url: resp.resolved_url(),
            raw,
        }
    }
}

/// Diagnostic trace of a failed lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl From<&LookupError> for LookupFailure {
    fn from(err: &LookupError) -> Self {
        Self { kind: err.kind(), detail: err.to_string() }
    }
}

/// What a source call left behind: metadata, an existence record, or a
/// failure trace. Failures that contributed to a decision are recorded, never
/// silently dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SourceRecord {
    Metadata(SourceMetadata),
    Handle(HandleRecord),
    Failure(LookupFailure),
}

impl SourceRecord {
    /// The metadata payload, if this record carries one.
    #[must_use]
    pub const fn metadata(&self) -> Option<&SourceMetadata> {
        match self {
            Self::Metadata(m) => Some(m),
            _ => None,
        }
    }
}
