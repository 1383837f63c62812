//! Property tests for the text matching primitives.

use proptest::prelude::*;

use citecheck::textmatch::{clean_author_name, parse_authors, similarity_ratio};

proptest! {
    #[test]
    fn similarity_is_within_unit_interval(a in ".{0,40}", b in ".{0,40}") {
        let ratio = similarity_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ratio), "ratio out of range: {ratio}");
    }

    #[test]
    fn similarity_with_self_is_one(s in ".{0,40}") {
        prop_assert!((similarity_ratio(&s, &s) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_with_empty_is_zero(s in ".{1,40}") {
        prop_assert!(similarity_ratio(&s, "").abs() < f64::EPSILON);
        prop_assert!(similarity_ratio("", &s).abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_ignores_case(a in "[a-zA-Z ]{0,40}", b in "[a-zA-Z ]{0,40}") {
        let lower = similarity_ratio(&a.to_lowercase(), &b.to_lowercase());
        let mixed = similarity_ratio(&a, &b);
        prop_assert!((lower - mixed).abs() < f64::EPSILON);
    }

    #[test]
    fn cleaning_is_idempotent(name in "[a-zA-Z .,{}'\"-]{0,60}") {
        let once = clean_author_name(&name);
        prop_assert_eq!(clean_author_name(&once), once.clone());
    }

    #[test]
    fn cleaned_names_are_lowercase(name in "[ -~]{0,60}") {
        let cleaned = clean_author_name(&name);
        prop_assert_eq!(cleaned.to_lowercase(), cleaned.clone());
    }

    #[test]
    fn parsed_authors_are_never_empty_strings(field in "[a-zA-Z ,.]{0,120}") {
        for author in parse_authors(&field) {
            prop_assert!(!author.is_empty());
        }
    }
}
