//! Search candidates and performer search terms

use std::fmt;

use serde::{Deserialize, Serialize};

use super::aliases::Aliases;

/// Entity identifier; the server sends IDs as strings but callers often
/// hold integers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for EntityId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// An entity returned by a search, under consideration by a matcher
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCandidate")]
pub struct Candidate {
    pub id: EntityId,
    pub name: String,
    pub aliases: Aliases,
    /// Only performers carry one
    pub disambiguation: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Aliases::default(),
            disambiguation: None,
        }
    }

    pub fn with_aliases(mut self, aliases: impl Into<Aliases>) -> Self {
        self.aliases = aliases.into();
        self
    }

    pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
        self.disambiguation = non_blank(Some(disambiguation.into()));
        self
    }
}

/// Wire shape of a candidate. Current servers send performer aliases as
/// `alias_list`; `aliases` is a list for tags and studios and a string for
/// groups and legacy performers.
#[derive(Deserialize)]
struct RawCandidate {
    id: EntityId,
    name: String,
    #[serde(default)]
    alias_list: Option<Aliases>,
    #[serde(default)]
    aliases: Option<Aliases>,
    #[serde(default)]
    disambiguation: Option<String>,
}

impl From<RawCandidate> for Candidate {
    fn from(raw: RawCandidate) -> Self {
        let aliases = match (raw.alias_list, raw.aliases) {
            (Some(list), _) => list,
            (None, Some(aliases)) => aliases,
            (None, None) => Aliases::default(),
        };
        Self {
            id: raw.id,
            name: raw.name,
            aliases,
            disambiguation: non_blank(raw.disambiguation),
        }
    }
}

/// A performer search term: a name plus an optional disambiguation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawPerformerSearch")]
pub struct PerformerSearch {
    pub name: String,
    pub disambiguation: Option<String>,
}

#[derive(Deserialize)]
struct RawPerformerSearch {
    name: String,
    #[serde(default)]
    disambiguation: Option<String>,
}

impl From<RawPerformerSearch> for PerformerSearch {
    fn from(raw: RawPerformerSearch) -> Self {
        Self {
            name: raw.name.trim().to_string(),
            disambiguation: non_blank(raw.disambiguation),
        }
    }
}

impl PerformerSearch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            disambiguation: None,
        }
    }

    pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
        self.disambiguation = non_blank(Some(disambiguation.into()));
        self
    }

    /// The string legacy aliases are compared against: `name`, or
    /// `name (disambiguation)` when a disambiguation is set
    pub fn alias_target(&self) -> String {
        match self.disambiguation.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(disambiguation) => format!("{} ({})", self.name, disambiguation),
            None => self.name.clone(),
        }
    }
}

/// Empty and whitespace-only disambiguations count as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
