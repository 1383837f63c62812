//! Fuzzy text matching for author names and titles.
//!
//! Holds the two pure helpers the verification engine leans on: a name
//! normalizer (LaTeX accent escapes stripped, whitespace collapsed,
//! lowercased) and a longest-matching-blocks similarity ratio, plus the
//! author-list comparison built on both.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Braced accent escape: `\'{e}`, `\"{a}`, also the bare-braced `\{e}` form.
static ACCENT_BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\['"`^~=.]?\{(.)\}"#).expect("valid accent pattern"));

/// Unbraced accent escape: `\'e`, `\~n`.
static ACCENT_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\['"`^~=.](.)"#).expect("valid accent pattern"));

/// Author separator in BibTeX author strings.
static AUTHOR_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+and\s+").expect("valid separator pattern"));

/// Normalize a person name for comparison: decode accent escapes to the bare
/// base character, collapse whitespace runs, trim, lowercase.
///
/// Idempotent: normalizing an already-normalized name is a no-op. The output
/// is for matching only, never for display.
#[must_use]
pub fn clean_author_name(name: &str) -> String {
    let name = ACCENT_BRACED.replace_all(name, "$1");
    let name = ACCENT_BARE.replace_all(&name, "$1");
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Split a BibTeX author field into normalized names, order preserved.
///
/// Names given as "Last, First" are reassembled as "first last" before
/// normalization.
#[must_use]
pub fn parse_authors(author_string: &str) -> Vec<String> {
    if author_string.trim().is_empty() {
        return Vec::new();
    }

    AUTHOR_SEP
        .split(author_string)
        .map(|author| {
            if let Some((last, first)) = author.split_once(',') {
                format!("{} {}", first.trim(), last.trim()).trim().to_string()
            } else {
                author.trim().to_string()
            }
        })
        .filter(|a| !a.is_empty())
        .map(|a| clean_author_name(&a))
        .collect()
}

/// Similarity ratio between two strings in `[0, 1]`.
///
/// Ratcliff/Obershelp: twice the total length of recursively-found longest
/// common blocks over the combined length. Both inputs are lowercased first,
/// so the ratio is symmetric under case-only differences. Identical strings
/// score 1.0, disjoint character sets 0.0.
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_total(&a, &b) as f64 / total as f64
}

/// Total characters covered by matching blocks: the longest common block,
/// then recursively the pieces to its left and right.
fn matching_total(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_total(&a[..ai], &b[..bi]) + matching_total(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block of `a` and `b` as (start in a, start in
/// b, length), preferring the leftmost on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0_usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![0_usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                cur[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = cur;
    }

    best
}

/// Outcome classes for an author-list comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthorClassification {
    /// Average similarity below 0.30: no correspondence at all.
    #[serde(rename = "FABRICATED_AUTHORS")]
    FabricatedAuthors,

    /// Average similarity in [0.30, 0.80): some overlap, not a match.
    #[serde(rename = "PARTIAL_MATCH")]
    PartialMatch,

    /// Average similarity at or above 0.80.
    #[serde(rename = "VERIFIED")]
    Verified,

    /// Claimed or actual author list was empty; no comparison possible.
    #[serde(rename = "MISSING_AUTHOR_DATA")]
    MissingData,
}

impl std::fmt::Display for AuthorClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FabricatedAuthors => "FABRICATED_AUTHORS",
            Self::PartialMatch => "PARTIAL_MATCH",
            Self::Verified => "VERIFIED",
            Self::MissingData => "MISSING_AUTHOR_DATA",
        };
        f.write_str(name)
    }
}

/// Result of comparing claimed against actual authors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorComparison {
    /// True only when the classification is `Verified`.
    pub is_match: bool,

    /// Average of per-claimed-author best similarities, in `[0, 1]`.
    pub similarity: f64,

    /// Tier the average falls into.
    pub classification: AuthorClassification,

    /// Claimed authors (normalized), citation order.
    pub claimed: Vec<String>,

    /// Actual authors (normalized) from the source record.
    pub actual: Vec<String>,
}

/// Compare claimed against actual authors.
///
/// Each claimed author contributes its best similarity against any actual
/// author; the average of those maxima decides the tier. Empty lists on
/// either side short-circuit without invoking the scorer.
#[must_use]
pub fn compare_authors(claimed: &[String], actual: &[String]) -> AuthorComparison {
    if claimed.is_empty() || actual.is_empty() {
        return AuthorComparison {
            is_match: false,
            similarity: 0.0,
            classification: AuthorClassification::MissingData,
            claimed: claimed.to_vec(),
            actual: actual.to_vec(),
        };
    }

    let sum: f64 = claimed
        .iter()
        .map(|c| actual.iter().map(|a| similarity_ratio(c, a)).fold(0.0, f64::max))
        .sum();
    let average = sum / claimed.len() as f64;
    let classification = classify(average);

    AuthorComparison {
        is_match: classification == AuthorClassification::Verified,
        similarity: average,
        classification,
        claimed: claimed.to_vec(),
        actual: actual.to_vec(),
    }
}

/// Tier for an average similarity. Lower bounds are exclusive of the band
/// below: exactly 0.30 is partial, exactly 0.80 is verified.
fn classify(average: f64) -> AuthorClassification {
    if average < 0.3 {
        AuthorClassification::FabricatedAuthors
    } else if average < 0.8 {
        AuthorClassification::PartialMatch
    } else {
        AuthorClassification::Verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_clean_author_name_accents() {
        assert_eq!(clean_author_name(r#"M\"{u}ller, J\'{o}zsef"#), "muller, jozsef");
        assert_eq!(clean_author_name(r"Garc\'ia"), "garcia");
    }

    #[test]
    fn test_clean_author_name_whitespace_and_case() {
        assert_eq!(clean_author_name("  John   SMITH "), "john smith");
    }

    #[test]
    fn test_clean_author_name_idempotent() {
        let once = clean_author_name(r#"Fran\c{c}ois  D\'Arcy"#);
        assert_eq!(clean_author_name(&once), once);
    }

    #[test]
    fn test_parse_authors_splits_and_reorders() {
        let authors = parse_authors("Smith, John and Jane Doe");
        assert_eq!(authors, names(&["john smith", "jane doe"]));
    }

    #[test]
    fn test_parse_authors_empty() {
        assert!(parse_authors("").is_empty());
        assert!(parse_authors("   ").is_empty());
    }

    #[test]
    fn test_similarity_identity_and_empty() {
        assert!((similarity_ratio("quantum widgets", "quantum widgets") - 1.0).abs() < 1e-12);
        assert!((similarity_ratio("abc", "")).abs() < 1e-12);
        assert!((similarity_ratio("", "") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_case_insensitive_symmetry() {
        let forward = similarity_ratio("Deep Learning", "deep learning");
        let backward = similarity_ratio("DEEP LEARNING", "Deep Learning");
        assert!((forward - 1.0).abs() < 1e-12);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_disjoint_is_zero() {
        assert!((similarity_ratio("abc", "xyz")).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_matches_sequence_matcher() {
        // difflib.SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert!((similarity_ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_compare_authors_verified() {
        let cmp =
            compare_authors(&names(&["john smith", "jane doe"]), &names(&["john smith", "jane doe"]));
        assert!(cmp.is_match);
        assert_eq!(cmp.classification, AuthorClassification::Verified);
        assert!((cmp.similarity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compare_authors_fabricated() {
        let cmp = compare_authors(&names(&["qq xx"]), &names(&["zz jones"]));
        assert_eq!(cmp.classification, AuthorClassification::FabricatedAuthors);
        assert!(!cmp.is_match);
        assert!(cmp.similarity < 0.3);
    }

    #[test]
    fn test_compare_authors_missing_data_short_circuits() {
        let cmp = compare_authors(&[], &names(&["jane doe"]));
        assert!(!cmp.is_match);
        assert_eq!(cmp.similarity, 0.0);
        assert_eq!(cmp.classification, AuthorClassification::MissingData);

        let cmp = compare_authors(&names(&["jane doe"]), &[]);
        assert_eq!(cmp.classification, AuthorClassification::MissingData);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(0.29), AuthorClassification::FabricatedAuthors);
        assert_eq!(classify(0.3), AuthorClassification::PartialMatch);
        assert_eq!(classify(0.79), AuthorClassification::PartialMatch);
        assert_eq!(classify(0.8), AuthorClassification::Verified);
    }

    #[test]
    fn test_compare_authors_partial() {
        // Shared surname, different given name lands between the bounds.
        let cmp = compare_authors(&names(&["a smith"]), &names(&["b smith"]));
        assert_eq!(cmp.classification, AuthorClassification::PartialMatch);
        assert!(!cmp.is_match);
    }
}
