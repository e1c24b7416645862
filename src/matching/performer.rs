//! Performer matching: name plus disambiguation, with legacy alias strings
//!
//! Works like [`names`](super::names) but compares with [`fuzzy_eq`]
//! (punctuation-insensitive), gates the name pass on disambiguation, and
//! folds the disambiguation into the alias comparison target.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::candidate::{Candidate, PerformerSearch};
use super::normalize::fuzzy_eq_ignore_case;

/// Both sides carry a disambiguation and the candidate's does not contain
/// the search's
fn disambiguation_conflicts(search: &PerformerSearch, candidate: &Candidate) -> bool {
    let non_blank = |d: &&str| !d.trim().is_empty();
    match (
        search.disambiguation.as_deref().filter(non_blank),
        candidate.disambiguation.as_deref().filter(non_blank),
    ) {
        (Some(wanted), Some(actual)) => !actual.contains(wanted),
        _ => false,
    }
}

/// First candidate, in input order, whose name fuzzily equals the search
/// name and whose disambiguation does not conflict
pub fn try_exact_performer_match<'a>(
    search: &PerformerSearch,
    candidates: &'a [Candidate],
) -> Option<&'a Candidate> {
    candidates.iter().find(|candidate| {
        !disambiguation_conflicts(search, candidate)
            && fuzzy_eq_ignore_case(&search.name, &candidate.name)
    })
}

/// Every candidate with an alias fuzzily equal to
/// [`PerformerSearch::alias_target`], in input order, deduplicated by id.
///
/// Candidates with malformed alias data are logged and skipped. Returns
/// `None` when nothing matched and at least one candidate was skipped that
/// way, since the answer is then unknown rather than empty.
pub fn collect_performer_alias_matches<'a>(
    search: &PerformerSearch,
    candidates: &'a [Candidate],
) -> Option<Vec<&'a Candidate>> {
    let target = search.alias_target();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    let mut skipped = 0usize;

    for candidate in candidates {
        let aliases = match candidate.aliases.resolve() {
            Ok(aliases) => aliases,
            Err(e) => {
                warn!(id = %candidate.id, name = %candidate.name, error = %e, "Ignoring malformed performer aliases");
                skipped += 1;
                continue;
            }
        };

        let hit = aliases
            .iter()
            .any(|alias| fuzzy_eq_ignore_case(alias.trim(), &target));
        if hit && seen.insert(&candidate.id) {
            matches.push(candidate);
        }
    }

    if matches.is_empty() && skipped > 0 {
        return None;
    }
    Some(matches)
}

/// Match a performer on name first, then aliases
pub fn match_performer<'a>(
    search: &PerformerSearch,
    candidates: &'a [Candidate],
) -> Option<Vec<&'a Candidate>> {
    if let Some(exact) = try_exact_performer_match(search, candidates) {
        debug!(search = %search.name, id = %exact.id, "Matched performer on name");
        return Some(vec![exact]);
    }

    let matches = collect_performer_alias_matches(search, candidates);
    debug!(
        search = %search.name,
        count = matches.as_ref().map(Vec::len),
        "Matched performer on alias"
    );
    matches
}
