//! Name/alias matching for tags, studios and groups
//!
//! A primary-name hit always wins: the first candidate whose name equals the
//! search term is returned alone, and aliases are never consulted. Only when
//! no name matches are aliases scanned, and then every matching candidate is
//! returned.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::candidate::Candidate;
use super::normalize::eq_ignore_case;

/// First candidate, in input order, whose name equals `search` ignoring case
pub fn try_exact_name_match<'a>(search: &str, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|candidate| eq_ignore_case(&candidate.name, search))
}

/// Every candidate with an alias equal to `search` ignoring case, in input
/// order, deduplicated by id
pub fn collect_alias_matches<'a>(search: &str, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for candidate in candidates {
        let aliases = match candidate.aliases.resolve() {
            Ok(aliases) => aliases,
            Err(e) => {
                warn!(id = %candidate.id, name = %candidate.name, error = %e, "Ignoring malformed aliases");
                continue;
            }
        };

        let hit = aliases
            .iter()
            .any(|alias| eq_ignore_case(alias.trim(), search));
        if hit && seen.insert(&candidate.id) {
            matches.push(candidate);
        }
    }

    matches
}

/// Match `search` against candidate names first, then aliases
pub fn match_by_name_or_alias<'a>(search: &str, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    if let Some(exact) = try_exact_name_match(search, candidates) {
        debug!(search = %search, id = %exact.id, "Matched on name");
        return vec![exact];
    }

    let matches = collect_alias_matches(search, candidates);
    debug!(search = %search, count = matches.len(), "Matched on alias");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::aliases::Aliases;
    use serde_json::json;

    fn ids(matches: &[&Candidate]) -> Vec<String> {
        matches.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_first_exact_name_short_circuits() {
        let candidates = vec![
            Candidate::new(1, "Jane Doe"),
            Candidate::new(2, "jane doe").with_aliases(vec!["Jane Doe".to_string()]),
        ];
        assert_eq!(ids(&match_by_name_or_alias("Jane Doe", &candidates)), vec!["1"]);
    }

    #[test]
    fn test_name_match_beats_earlier_alias_match() {
        let candidates = vec![
            Candidate::new(1, "Outdoor").with_aliases(vec!["Beach".to_string()]),
            Candidate::new(2, "Beach"),
        ];
        assert_eq!(ids(&match_by_name_or_alias("beach", &candidates)), vec!["2"]);
    }

    #[test]
    fn test_alias_fallback() {
        let candidates = vec![Candidate::new(1, "Alpha").with_aliases(vec![
            "Beta".to_string(),
            "Gamma".to_string(),
        ])];
        assert_eq!(ids(&match_by_name_or_alias("gamma", &candidates)), vec!["1"]);
    }

    #[test]
    fn test_alias_pass_collects_all_in_order() {
        let candidates = vec![
            Candidate::new(5, "One").with_aliases(vec!["shared".to_string()]),
            Candidate::new(3, "Two"),
            Candidate::new(4, "Three").with_aliases(vec![" Shared ".to_string(), "SHARED".to_string()]),
        ];
        assert_eq!(ids(&match_by_name_or_alias("Shared", &candidates)), vec!["5", "4"]);
    }

    #[test]
    fn test_alias_pass_dedups_by_id() {
        let candidates = vec![
            Candidate::new(1, "One").with_aliases(vec!["x".to_string()]),
            Candidate::new(1, "One again").with_aliases(vec!["X".to_string()]),
        ];
        assert_eq!(collect_alias_matches("x", &candidates).len(), 1);
    }

    #[test]
    fn test_matching_is_anchored() {
        let candidates = vec![Candidate::new(1, "Foobar").with_aliases(vec!["Foo bar".to_string()])];
        assert!(match_by_name_or_alias("Foo", &candidates).is_empty());
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let candidates = vec![
            Candidate::new(1, "AxB"),
            Candidate::new(2, "A.B (C)"),
        ];
        assert_eq!(ids(&match_by_name_or_alias("a.b (c)", &candidates)), vec!["2"]);
    }

    #[test]
    fn test_delimited_aliases_are_split() {
        let candidates = vec![Candidate::new(1, "Group").with_aliases("First Cut/Director's Cut")];
        assert_eq!(ids(&match_by_name_or_alias("director's cut", &candidates)), vec!["1"]);
    }

    #[test]
    fn test_malformed_aliases_are_skipped() {
        let candidates = vec![
            Candidate::new(1, "Broken").with_aliases(Aliases::Unrecognized(json!(7))),
            Candidate::new(2, "Fine").with_aliases(vec!["seven".to_string()]),
        ];
        assert_eq!(ids(&collect_alias_matches("Seven", &candidates)), vec!["2"]);
    }

    #[test]
    fn test_no_candidates() {
        assert!(match_by_name_or_alias("anything", &[]).is_empty());
    }
}
