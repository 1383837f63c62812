//! BibTeX reference-file parsing.
//!
//! Two-stage best-effort scan: a block tokenizer recognizes `@type{key,`
//! headers and captures the body up to a closing brace on its own line, then
//! a field tokenizer extracts `name = {value}` pairs from each body.
//! Malformed or unterminated blocks produce no entry; this is not a strict
//! grammar and unrecognized syntax between blocks is ignored.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Start of an entry block: `@article{smith2023,`.
static BLOCK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)\{([^,\s{}]+),").expect("valid block header pattern"));

/// A `name = {value}` field pair inside an entry body.
static FIELD_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*\{([^}]*)\}").expect("valid field pair pattern"));

/// A single citation entry, immutable once parsed.
///
/// `fields` holds every field of the entry verbatim (values trimmed), with
/// names case-folded to lowercase. The key and entry type are kept apart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CitationEntry {
    /// Citation key, unique within a file.
    pub key: String,

    /// Entry type (`article`, `inproceedings`, ...), as written.
    pub entry_type: String,

    /// Field name -> value, names lowercased.
    pub fields: BTreeMap<String, String>,
}

impl CitationEntry {
    /// Get a field value by (lowercase) name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Parse the full text of a BibTeX file into entries, in file order.
///
/// Empty input yields an empty Vec, never an error.
#[must_use]
pub fn parse_entries(content: &str) -> Vec<CitationEntry> {
    let mut entries = Vec::new();

    for header in BLOCK_HEADER.captures_iter(content) {
        let whole = header.get(0).expect("capture 0 always present");
        let Some(body) = block_body(&content[whole.end()..]) else {
            tracing::debug!(key = &header[2], "skipping unterminated entry block");
            continue;
        };

        let mut fields = BTreeMap::new();
        for pair in FIELD_PAIR.captures_iter(body) {
            fields.insert(pair[1].to_lowercase(), pair[2].trim().to_string());
        }

        entries.push(CitationEntry {
            key: header[2].to_string(),
            entry_type: header[1].to_string(),
            fields,
        });
    }

    tracing::debug!(count = entries.len(), "parsed reference file");
    entries
}

/// Slice of `rest` up to the block terminator: a closing brace at the start
/// of its own line. Returns `None` when the block never terminates.
fn block_body(rest: &str) -> Option<&str> {
    rest.find("\n}").map(|end| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"@article{smith2023,
  author = {Smith, John and Doe, Jane},
  title = {A Study of Things},
  journal = {Journal of Results},
  year = {2023},
  doi = {10.1234/abc}
}

@inproceedings{jones2022,
  Author = {Jones, Alice},
  title = {Conference Findings},
  booktitle = {Proc. of Stuff},
  year = {2022}
}
";

    #[test]
    fn test_parse_two_entries_in_order() {
        let entries = parse_entries(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "smith2023");
        assert_eq!(entries[0].entry_type, "article");
        assert_eq!(entries[1].key, "jones2022");
        assert_eq!(entries[1].entry_type, "inproceedings");
    }

    #[test]
    fn test_field_names_lowercased_values_trimmed() {
        let entries = parse_entries(SAMPLE);
        assert_eq!(entries[1].field("author"), Some("Jones, Alice"));
        assert_eq!(entries[0].field("doi"), Some("10.1234/abc"));
        assert_eq!(entries[0].field("year"), Some("2023"));
    }

    #[test]
    fn test_empty_input_yields_no_entries() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("% just a comment\n").is_empty());
    }

    #[test]
    fn test_unterminated_block_is_skipped() {
        let text = "@article{broken,\n  title = {No closing brace}\n";
        assert!(parse_entries(text).is_empty());
    }

    #[test]
    fn test_unterminated_block_does_not_swallow_later_entries() {
        let text = "@article{broken,\n  title = {Oops}\n@misc{ok,\n  title = {Fine}\n}\n";
        let entries = parse_entries(text);
        // Best-effort scan: the broken header still finds the later
        // terminator, the well-formed entry is always recovered.
        assert!(entries.iter().any(|e| e.key == "ok"));
    }

    #[test]
    fn test_garbage_between_entries_ignored() {
        let text = format!("random preamble text\n{SAMPLE}\ntrailing noise");
        assert_eq!(parse_entries(&text).len(), 2);
    }
}
