//! Wire shapes for the three metadata providers.
//!
//! Deserialization targets only; the client converts these into the
//! normalized records the engine consumes. Every field is defaulted because
//! all three APIs omit fields freely.

use serde::Deserialize;

/// A CrossRef work, the `message` part of the works response.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossrefWork {
    /// Registered DOI, canonical casing.
    #[serde(rename = "DOI")]
    pub doi: Option<String>,

    /// Title variants; the first is the display title.
    #[serde(default)]
    pub title: Vec<String>,

    /// Authors in byline order.
    #[serde(default)]
    pub author: Vec<CrossrefAuthor>,

    /// Print/online publication date.
    #[serde(default)]
    pub published: Option<DateParts>,

    /// Deposit date, present even for works without a published date.
    #[serde(default)]
    pub created: Option<DateParts>,

    /// Journal or proceedings title.
    #[serde(default, rename = "container-title")]
    pub container_title: Vec<String>,

    /// Publisher name.
    #[serde(default)]
    pub publisher: Option<String>,

    /// Work type (`journal-article`, `proceedings-article`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl CrossrefWork {
    /// Publication year: `published` date first, falling back to `created`.
    #[must_use]
    pub fn year(&self) -> Option<i64> {
        self.published
            .as_ref()
            .and_then(DateParts::year)
            .or_else(|| self.created.as_ref().and_then(DateParts::year))
    }

    /// Venue: first container title, else the publisher.
    #[must_use]
    pub fn venue(&self) -> Option<String> {
        self.container_title.first().cloned().or_else(|| self.publisher.clone())
    }
}

/// One CrossRef author.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossrefAuthor {
    #[serde(default)]
    pub given: Option<String>,

    #[serde(default)]
    pub family: Option<String>,
}

impl CrossrefAuthor {
    /// "given family", skipping whichever part is absent.
    #[must_use]
    pub fn full_name(&self) -> String {
        let given = self.given.as_deref().unwrap_or("");
        let family = self.family.as_deref().unwrap_or("");
        format!("{given} {family}").trim().to_string()
    }
}

/// CrossRef date encoded as nested `date-parts` arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct DateParts {
    #[serde(default, rename = "date-parts")]
    pub date_parts: Vec<Vec<Option<i64>>>,
}

impl DateParts {
    /// Year component, the first element of the first parts array.
    #[must_use]
    pub fn year(&self) -> Option<i64> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

/// doi.org Handle System resolution response.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleResponse {
    /// 1 means the handle resolved; anything else is a miss regardless of
    /// transport status.
    #[serde(rename = "responseCode")]
    pub response_code: i64,

    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub values: Vec<HandleValue>,
}

impl HandleResponse {
    /// The resolved URL, taken from the first `URL`-typed handle value.
    #[must_use]
    pub fn resolved_url(&self) -> Option<String> {
        self.values
            .iter()
            .find(|v| v.kind.as_deref() == Some("URL"))
            .and_then(|v| v.data.as_ref())
            .and_then(|d| d.value.as_str())
            .map(ToString::to_string)
    }
}

/// One typed value attached to a handle.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleValue {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub data: Option<HandleData>,
}

/// Payload of a handle value; `value` is a string for `URL` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct HandleData {
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Semantic Scholar paper search response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarSearchResponse {
    #[serde(default)]
    pub total: i64,

    #[serde(default)]
    pub data: Vec<ScholarPaper>,
}

/// A paper hit from the Semantic Scholar search.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarPaper {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub authors: Vec<ScholarAuthor>,

    #[serde(default)]
    pub year: Option<i64>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default, rename = "externalIds")]
    pub external_ids: Option<ScholarExternalIds>,
}

impl ScholarPaper {
    /// DOI from the external identifiers, if indexed.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.external_ids.as_ref()?.doi.as_deref()
    }
}

/// Author reference in a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// External identifiers attached to a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarExternalIds {
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossref_work_year_prefers_published() {
        let json = serde_json::json!({
            "DOI": "10.1/x",
            "published": {"date-parts": [[2021, 3]]},
            "created": {"date-parts": [[2020, 12]]}
        });
        let work: CrossrefWork = serde_json::from_value(json).unwrap();
        assert_eq!(work.year(), Some(2021));
    }

    #[test]
    fn test_crossref_work_year_falls_back_to_created() {
        let json = serde_json::json!({
            "DOI": "10.1/x",
            "created": {"date-parts": [[2019]]}
        });
        let work: CrossrefWork = serde_json::from_value(json).unwrap();
        assert_eq!(work.year(), Some(2019));
    }

    #[test]
    fn test_crossref_venue_container_title_over_publisher() {
        let json = serde_json::json!({
            "DOI": "10.1/x",
            "container-title": ["Journal of Results"],
            "publisher": "Big Press"
        });
        let work: CrossrefWork = serde_json::from_value(json).unwrap();
        assert_eq!(work.venue(), Some("Journal of Results".to_string()));
    }

    #[test]
    fn test_crossref_author_full_name_handles_missing_parts() {
        let author = CrossrefAuthor { given: None, family: Some("Smith".to_string()) };
        assert_eq!(author.full_name(), "Smith");
    }

    #[test]
    fn test_handle_response_resolved_url() {
        let json = serde_json::json!({
            "responseCode": 1,
            "handle": "10.48550/arXiv.2101.00001",
            "values": [
                {"index": 100, "type": "HS_ADMIN", "data": {"value": {}}},
                {"index": 1, "type": "URL", "data": {"value": "https://arxiv.org/abs/2101.00001"}}
            ]
        });
        let resp: HandleResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.response_code, 1);
        assert_eq!(resp.resolved_url(), Some("https://arxiv.org/abs/2101.00001".to_string()));
    }

    #[test]
    fn test_scholar_paper_doi() {
        let json = serde_json::json!({
            "title": "Quantum Widgets",
            "authors": [{"name": "Z. Jones"}],
            "year": 2022,
            "externalIds": {"DOI": "10.5/qw"}
        });
        let paper: ScholarPaper = serde_json::from_value(json).unwrap();
        assert_eq!(paper.doi(), Some("10.5/qw"));
    }
}
