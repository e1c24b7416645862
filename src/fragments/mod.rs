//! GraphQL fragment library and reference resolution
//!
//! Queries sent to the server reference named fragments (`...Performer`)
//! instead of spelling out every selection set. Before a document is sent,
//! [`FragmentLibrary::resolve`] appends the definition of every fragment it
//! references (and every fragment those reference, transitively) so the
//! server receives a self-contained document.
//!
//! Resolution works on plain text rather than a parsed AST: references are
//! found by scanning for `...Name`, definitions by scanning for
//! `fragment Name on`.

pub mod builtin;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

/// `fragment <Name> on <Type> {`, the header of a fragment block
static FRAGMENT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfragment\s+([_A-Za-z][_0-9A-Za-z]*)\s+on\s+([_A-Za-z][_0-9A-Za-z]*)\s*\{")
        .expect("fragment header pattern is valid")
});

/// `fragment <Name> on`, enough to count a fragment as defined in a document
static FRAGMENT_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfragment\s+([_A-Za-z][_0-9A-Za-z]*)\s+on\b")
        .expect("fragment declaration pattern is valid")
});

/// `...<Name>`, a fragment spread
static FRAGMENT_SPREAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\.\.([_A-Za-z][_0-9A-Za-z]*)").expect("fragment spread pattern is valid")
});

/// A named fragment and its full `fragment Name on Type { ... }` text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDefinition {
    pub name: String,
    pub source: String,
}

impl FragmentDefinition {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The type named after `on` in the fragment header, if the source has one
    pub fn type_condition(&self) -> Option<&str> {
        FRAGMENT_HEADER
            .captures(&self.source)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str())
    }
}

/// Named fragment definitions available to query resolution
#[derive(Debug, Clone, Default)]
pub struct FragmentLibrary {
    fragments: HashMap<String, FragmentDefinition>,
}

impl FragmentLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library pre-populated with the bundled fragments
    pub fn with_builtin() -> Self {
        let mut library = Self::new();
        for block in builtin::FRAGMENTS {
            library.parse_fragments(block);
        }
        library
    }

    /// Parse every fragment block in `text` and register it.
    ///
    /// Fragments replace any previous entry with the same name. Returns the
    /// fragments parsed from this text.
    pub fn parse_fragments(&mut self, text: &str) -> HashMap<String, FragmentDefinition> {
        let parsed = parse_fragment_blocks(text);
        for (name, fragment) in &parsed {
            self.fragments.insert(name.clone(), fragment.clone());
        }
        debug!(count = parsed.len(), total = self.fragments.len(), "Registered fragments");
        parsed
    }

    /// Register a single fragment under `name`, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        let name = name.into();
        let fragment = FragmentDefinition::new(name.clone(), source);
        self.fragments.insert(name, fragment);
    }

    /// Register a type-name to fragment-text mapping, e.g. fragments
    /// generated from schema introspection
    pub fn extend<I, K, V>(&mut self, fragments: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, source) in fragments {
            self.insert(name, source);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Registered fragment names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fragments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Append the definition of every fragment `query` references but does
    /// not define, until the document is self-contained.
    ///
    /// Each pass appends the missing fragments in the order they are first
    /// referenced, so the output is deterministic. Fails with
    /// [`Error::UnknownFragment`] on the first reference the library cannot
    /// satisfy.
    pub fn resolve(&self, query: &str) -> Result<String> {
        let mut document = query.to_string();
        let mut appended: HashSet<String> = HashSet::new();
        let mut pass = 0usize;

        loop {
            let defined = defined_fragments(&document);
            let missing: Vec<String> = referenced_fragments(&document)
                .into_iter()
                .filter(|name| !defined.contains(name))
                .collect();

            if missing.is_empty() {
                debug!(passes = pass, appended = appended.len(), "Fragments resolved");
                return Ok(document);
            }

            pass += 1;
            debug!(pass, missing = ?missing, "Resolving fragment references");

            for name in missing {
                // Appended last pass yet still undeclared: no pass can fix it
                if appended.contains(&name) {
                    return Err(Error::UnresolvableFragment(name));
                }
                let fragment = self
                    .fragments
                    .get(&name)
                    .ok_or_else(|| Error::UnknownFragment(name.clone()))?;
                document.push('\n');
                document.push_str(&fragment.source);
                appended.insert(name);
            }
        }
    }
}

/// Parse fragment blocks out of `text` without touching any library.
///
/// Block extent is found by brace matching, so nested selection sets stay
/// inside their fragment. An unterminated block runs to the end of `text`.
pub fn parse_fragment_blocks(text: &str) -> HashMap<String, FragmentDefinition> {
    let mut parsed = HashMap::new();
    let mut cursor = 0;

    while let Some(caps) = FRAGMENT_HEADER.captures_at(text, cursor) {
        let (Some(header), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let end = block_end(text, header.end());
        let fragment = FragmentDefinition::new(name.as_str(), &text[header.start()..end]);
        parsed.insert(fragment.name.clone(), fragment);
        cursor = end;
    }

    parsed
}

/// Byte offset just past the `}` closing the block whose body starts at
/// `body_start`, or the end of `text` if the block never closes
fn block_end(text: &str, body_start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, ch) in text[body_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return body_start + offset + ch.len_utf8(),
            '}' => depth -= 1,
            _ => {}
        }
    }
    text.len()
}

/// Distinct fragment names spread anywhere in `document`, in order of first
/// appearance. Inline fragments (`...on Type`) are not references.
pub fn referenced_fragments(document: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    FRAGMENT_SPREAD
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| *name != "on")
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Fragment names declared (`fragment Name on`) anywhere in `document`
pub fn defined_fragments(document: &str) -> HashSet<String> {
    FRAGMENT_DECLARATION
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
