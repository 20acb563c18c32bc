//! Property tests for request validation and pagination helpers

use proptest::prelude::*;
use vidtube::shared::pagination::{Pagination, MAX_LIMIT};
use vidtube::shared::validation::{contains_pattern, escape_like, is_valid_username, parse_id};

/// Undo `escape_like`
fn unescape(escaped: &str) -> String {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

proptest! {
    #[test]
    fn escaped_like_has_no_bare_wildcards(input in ".*") {
        let escaped = escape_like(&input);
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                prop_assert!(matches!(chars.next(), Some('%' | '_' | '\\')));
            } else {
                prop_assert!(c != '%' && c != '_');
            }
        }
        prop_assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn contains_pattern_wraps_input(input in "[a-zA-Z0-9 ]{0,20}") {
        let pattern = contains_pattern(Some(&input));
        prop_assert!(pattern.starts_with('%'));
        prop_assert!(pattern.ends_with('%'));
        prop_assert_eq!(&pattern[1..pattern.len() - 1], input.trim());
    }

    #[test]
    fn usernames_of_two_or_more_characters_are_valid(name in "[a-z0-9_.-]{2,60}") {
        prop_assert!(is_valid_username(&name));
    }

    #[test]
    fn padded_single_characters_are_invalid(c in "[a-z]", pad in " {0,5}") {
        let name = format!("{pad}{c}{pad}");
        prop_assert!(!is_valid_username(&name));
    }

    #[test]
    fn non_uuid_ids_are_rejected(raw in "[g-z]{1,40}") {
        prop_assert!(parse_id(&raw, "video").is_err());
    }

    #[test]
    fn pagination_never_exceeds_max(page in 1i64..1_000, limit in 1i64..10_000) {
        let p = Pagination::new(Some(page), Some(limit)).unwrap();
        prop_assert!(p.limit <= MAX_LIMIT);
        prop_assert_eq!(p.offset(), (page - 1) * p.limit);
    }
}
