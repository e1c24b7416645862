//! Alias data in its list and legacy delimited-string forms
//!
//! Tags and studios return `aliases` as a list. Performers return
//! `alias_list` on current servers but a single delimited `aliases` string
//! on older ones, and groups return `aliases` as a string. Everything is
//! converted to a list through [`Aliases::resolve`] before comparison.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Delimiters tried, in order, against a legacy alias string
pub const ALIAS_DELIMITERS: [char; 4] = ['/', '\n', ',', ';'];

/// Alias data as it arrives from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Aliases {
    /// Already split into individual aliases
    List(Vec<String>),
    /// Legacy single string holding delimited aliases
    Delimited(String),
    /// Any other JSON shape; cannot be interpreted
    Unrecognized(JsonValue),
}

impl Default for Aliases {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Alias data that is neither a list nor a string
#[derive(Debug, Clone, Error)]
#[error("Could not parse aliases {raw}")]
pub struct MalformedAliasData {
    pub raw: String,
}

impl Aliases {
    /// The aliases as a list, splitting the legacy string form
    pub fn resolve(&self) -> Result<Cow<'_, [String]>, MalformedAliasData> {
        match self {
            Self::List(aliases) => Ok(Cow::Borrowed(aliases.as_slice())),
            Self::Delimited(raw) => Ok(Cow::Owned(split_aliases(raw))),
            Self::Unrecognized(value) => Err(MalformedAliasData {
                raw: value.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(aliases) => aliases.is_empty(),
            Self::Delimited(raw) => raw.trim().is_empty(),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<Vec<String>> for Aliases {
    fn from(aliases: Vec<String>) -> Self {
        Self::List(aliases)
    }
}

impl From<&[&str]> for Aliases {
    fn from(aliases: &[&str]) -> Self {
        Self::List(aliases.iter().map(|a| a.to_string()).collect())
    }
}

impl From<&str> for Aliases {
    fn from(raw: &str) -> Self {
        Self::Delimited(raw.to_string())
    }
}

/// Split a legacy alias string on the first of [`ALIAS_DELIMITERS`] it
/// contains. A string with no delimiter is a single alias; an empty one has
/// none.
pub fn split_aliases(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match ALIAS_DELIMITERS.iter().find(|d| raw.contains(**d)) {
        Some(delimiter) => raw
            .split(*delimiter)
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(String::from)
            .collect(),
        None => vec![raw.trim().to_string()],
    }
}
