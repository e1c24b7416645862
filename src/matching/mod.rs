//! Alias-aware entity matching
//!
//! Search endpoints return every entity loosely related to a term. These
//! matchers pick the one(s) the caller meant: primary-name hits first, then
//! alias hits, with [`OnMultipleMatch`] deciding what an ambiguous result
//! becomes. Everything here is pure and synchronous.

pub mod aliases;
pub mod candidate;
pub mod names;
pub mod normalize;
pub mod performer;
pub mod policy;

pub use aliases::{Aliases, MalformedAliasData, split_aliases};
pub use candidate::{Candidate, EntityId, PerformerSearch};
pub use names::{collect_alias_matches, match_by_name_or_alias, try_exact_name_match};
pub use normalize::{fuzzy_eq, fuzzy_eq_ignore_case, normalize};
pub use performer::{collect_performer_alias_matches, match_performer, try_exact_performer_match};
pub use policy::{MatchResult, OnMultipleMatch, apply_policy};
