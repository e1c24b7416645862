//! Text normalization shared by the name matchers

use once_cell::sync::Lazy;
use regex::Regex;

/// ASCII punctuation plus every Unicode punctuation character
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:punct:]\p{P}]").expect("punctuation pattern is valid"));

/// Normalize a name for fuzzy comparison.
///
/// Punctuation becomes whitespace, whitespace runs collapse to a single
/// space, and the result is trimmed. Case is left alone; see [`fuzzy_eq`].
///
/// # Example
/// ```
/// use stash_client::matching::normalize;
/// assert_eq!(normalize("  Foo, Bar!! "), "Foo Bar");
/// ```
pub fn normalize(s: &str) -> String {
    PUNCTUATION
        .replace_all(s, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare two names after [`normalize`]
pub fn fuzzy_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// Case-insensitive [`fuzzy_eq`], the default comparison
pub fn fuzzy_eq_ignore_case(a: &str, b: &str) -> bool {
    fuzzy_eq(a, b, false)
}

/// Whole-string case-insensitive equality, without punctuation folding.
/// "Foo" never matches "Foobar".
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
