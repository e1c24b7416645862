//! What to do when a search matches more than one entity

use tracing::warn;

/// Disposition of an ambiguous (multi-entity) match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMultipleMatch {
    /// Treat ambiguity as no match
    #[default]
    ReturnNone,
    /// Return every match
    ReturnList,
    /// Return the first match in result order
    ReturnFirst,
}

/// Final outcome of a find
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<T> {
    None,
    Single(T),
    /// Only produced under [`OnMultipleMatch::ReturnList`]
    Multiple(Vec<T>),
}

impl<T> MatchResult<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The single match, if there is exactly one
    pub fn single(self) -> Option<T> {
        match self {
            Self::Single(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => Vec::new(),
            Self::Single(item) => vec![item],
            Self::Multiple(items) => items,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> MatchResult<U> {
        match self {
            Self::None => MatchResult::None,
            Self::Single(item) => MatchResult::Single(f(item)),
            Self::Multiple(items) => MatchResult::Multiple(items.into_iter().map(f).collect()),
        }
    }
}

/// Reduce a raw match list to a [`MatchResult`] under `policy`
pub fn apply_policy<T>(mut matches: Vec<T>, policy: OnMultipleMatch) -> MatchResult<T> {
    match matches.len() {
        0 => MatchResult::None,
        1 => MatchResult::Single(matches.remove(0)),
        count => match policy {
            OnMultipleMatch::ReturnNone => {
                warn!(count, "Ambiguous match, returning none");
                MatchResult::None
            }
            OnMultipleMatch::ReturnList => MatchResult::Multiple(matches),
            OnMultipleMatch::ReturnFirst => {
                warn!(count, "Ambiguous match, returning first");
                MatchResult::Single(matches.remove(0))
            }
        },
    }
}
