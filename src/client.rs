//! Entity-access client
//!
//! [`StashClient`] resolves fragment references in every outgoing document,
//! sends it through a [`Transport`], and layers name/alias matching on top
//! of the server's free-text search to find specific tags, studios, groups
//! and performers.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::fragments::FragmentLibrary;
use crate::matching::{
    Candidate, MatchResult, OnMultipleMatch, PerformerSearch, apply_policy, match_by_name_or_alias,
    match_performer,
};
use crate::transport::{GraphQLRequest, HttpTransport, Transport};

const FIND_TAGS: &str = "query FindTags($filter: FindFilterType) {
  findTags(filter: $filter) { count tags { ...Tag } }
}";

const FIND_STUDIOS: &str = "query FindStudios($filter: FindFilterType) {
  findStudios(filter: $filter) { count studios { ...Studio } }
}";

const FIND_GROUPS: &str = "query FindGroups($filter: FindFilterType) {
  findGroups(filter: $filter) { count groups { ...Group } }
}";

const FIND_PERFORMERS: &str = "query FindPerformers($filter: FindFilterType) {
  findPerformers(filter: $filter) { count performers { ...Performer } }
}";

const CREATE_TAG: &str = "mutation TagCreate($input: TagCreateInput!) {
  tagCreate(input: $input) { ...Tag }
}";

const CREATE_STUDIO: &str = "mutation StudioCreate($input: StudioCreateInput!) {
  studioCreate(input: $input) { ...Studio }
}";

/// Entity kinds searched by name
#[derive(Debug, Clone, Copy)]
enum SearchKind {
    Tags,
    Studios,
    Groups,
    Performers,
}

impl SearchKind {
    fn query(self) -> &'static str {
        match self {
            Self::Tags => FIND_TAGS,
            Self::Studios => FIND_STUDIOS,
            Self::Groups => FIND_GROUPS,
            Self::Performers => FIND_PERFORMERS,
        }
    }

    /// (root field, list field) of the response
    fn fields(self) -> (&'static str, &'static str) {
        match self {
            Self::Tags => ("findTags", "tags"),
            Self::Studios => ("findStudios", "studios"),
            Self::Groups => ("findGroups", "groups"),
            Self::Performers => ("findPerformers", "performers"),
        }
    }
}

/// Client for a Stash server's GraphQL API
#[derive(Clone)]
pub struct StashClient {
    transport: Arc<dyn Transport>,
    fragments: Arc<RwLock<FragmentLibrary>>,
}

impl StashClient {
    /// Create a client over `transport` with the bundled fragments registered
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            fragments: Arc::new(RwLock::new(FragmentLibrary::with_builtin())),
        }
    }

    /// Create an HTTP client from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        info!(url = %config.url, "Creating Stash client");
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Register every fragment block in `text`, replacing same-named
    /// fragments. Returns the registered names, sorted.
    pub fn register_fragments(&self, text: &str) -> Vec<String> {
        let parsed = self.fragments.write().parse_fragments(text);
        let mut names: Vec<String> = parsed.into_keys().collect();
        names.sort_unstable();
        names
    }

    /// Read access to the fragment library
    pub fn fragments(&self) -> RwLockReadGuard<'_, FragmentLibrary> {
        self.fragments.read()
    }

    /// Make `query` self-contained by appending the fragments it references
    pub fn resolve_query(&self, query: &str) -> Result<String> {
        self.fragments.read().resolve(query)
    }

    /// Resolve fragments, send the document, and return its `data` member.
    ///
    /// An unknown fragment fails before anything is sent.
    pub async fn call_gql(&self, query: &str, variables: Option<JsonValue>) -> Result<JsonValue> {
        let document = self.resolve_query(query)?;
        let request = GraphQLRequest::new(document, variables);
        debug!(bytes = request.query.len(), "Sending GraphQL request");

        let response = self.transport.post(&request).await?;
        response.into_data()
    }

    async fn search(&self, kind: SearchKind, term: &str) -> Result<Vec<JsonValue>> {
        let variables = json!({ "filter": { "q": term, "per_page": -1 } });
        let mut data = self.call_gql(kind.query(), Some(variables)).await?;

        let (root, list) = kind.fields();
        let entities = data
            .get_mut(root)
            .and_then(|root| root.get_mut(list))
            .map(JsonValue::take)
            .unwrap_or(JsonValue::Null);

        let entities = match entities {
            JsonValue::Array(entities) => entities,
            JsonValue::Null => Vec::new(),
            other => {
                return Err(Error::Other(anyhow::anyhow!(
                    "Expected a list at {root}.{list}, got {other}"
                )));
            }
        };
        debug!(?kind, term, count = entities.len(), "Search returned entities");
        Ok(entities)
    }

    /// Tags the server's search returns for `name`, unfiltered
    pub async fn find_tags(&self, name: &str) -> Result<Vec<JsonValue>> {
        self.search(SearchKind::Tags, name.trim()).await
    }

    /// Studios the server's search returns for `name`, unfiltered
    pub async fn find_studios(&self, name: &str) -> Result<Vec<JsonValue>> {
        self.search(SearchKind::Studios, name.trim()).await
    }

    /// Groups the server's search returns for `name`, unfiltered
    pub async fn find_groups(&self, name: &str) -> Result<Vec<JsonValue>> {
        self.search(SearchKind::Groups, name.trim()).await
    }

    /// Performers the server's search returns for `search.name`, unfiltered
    pub async fn find_performers(&self, search: &PerformerSearch) -> Result<Vec<JsonValue>> {
        self.search(SearchKind::Performers, search.name.trim()).await
    }

    /// The tag named (or aliased) `name`
    pub async fn find_tag(&self, name: &str, policy: OnMultipleMatch) -> Result<MatchResult<JsonValue>> {
        self.find_by_name_or_alias(SearchKind::Tags, name, policy).await
    }

    /// The studio named (or aliased) `name`
    pub async fn find_studio(
        &self,
        name: &str,
        policy: OnMultipleMatch,
    ) -> Result<MatchResult<JsonValue>> {
        self.find_by_name_or_alias(SearchKind::Studios, name, policy).await
    }

    /// The group named (or aliased) `name`
    pub async fn find_group(&self, name: &str, policy: OnMultipleMatch) -> Result<MatchResult<JsonValue>> {
        self.find_by_name_or_alias(SearchKind::Groups, name, policy).await
    }

    async fn find_by_name_or_alias(
        &self,
        kind: SearchKind,
        name: &str,
        policy: OnMultipleMatch,
    ) -> Result<MatchResult<JsonValue>> {
        let name = name.trim();
        let entities = self.search(kind, name).await?;
        let candidates = to_candidates(&entities)?;

        let matches = match_by_name_or_alias(name, &candidates);
        Ok(apply_policy(select(&entities, &candidates, &matches), policy))
    }

    /// The performer matching `search` by name, disambiguation and aliases.
    ///
    /// Returns `None` when nothing matched and some candidate's alias data
    /// could not be parsed, since the outcome is then unknown rather than
    /// empty.
    pub async fn find_performer(
        &self,
        search: &PerformerSearch,
        policy: OnMultipleMatch,
    ) -> Result<Option<MatchResult<JsonValue>>> {
        let entities = self.find_performers(search).await?;
        let candidates = to_candidates(&entities)?;

        match match_performer(search, &candidates) {
            Some(matches) => Ok(Some(apply_policy(select(&entities, &candidates, &matches), policy))),
            None => {
                warn!(name = %search.name, "Performer aliases could not be parsed, outcome unknown");
                Ok(None)
            }
        }
    }

    /// Create a tag named `name`
    pub async fn create_tag(&self, name: &str) -> Result<JsonValue> {
        info!(name, "Creating tag");
        let variables = json!({ "input": { "name": name.trim() } });
        let mut data = self.call_gql(CREATE_TAG, Some(variables)).await?;
        take_field(&mut data, "tagCreate")
    }

    /// Create a studio named `name`
    pub async fn create_studio(&self, name: &str) -> Result<JsonValue> {
        info!(name, "Creating studio");
        let variables = json!({ "input": { "name": name.trim() } });
        let mut data = self.call_gql(CREATE_STUDIO, Some(variables)).await?;
        take_field(&mut data, "studioCreate")
    }

    /// The tag named (or aliased) `name`, created if none exists
    pub async fn find_or_create_tag(&self, name: &str) -> Result<JsonValue> {
        match self.find_tag(name, OnMultipleMatch::ReturnFirst).await?.single() {
            Some(tag) => Ok(tag),
            None => self.create_tag(name).await,
        }
    }

    /// The studio named (or aliased) `name`, created if none exists
    pub async fn find_or_create_studio(&self, name: &str) -> Result<JsonValue> {
        match self.find_studio(name, OnMultipleMatch::ReturnFirst).await?.single() {
            Some(studio) => Ok(studio),
            None => self.create_studio(name).await,
        }
    }
}

fn to_candidates(entities: &[JsonValue]) -> Result<Vec<Candidate>> {
    entities
        .iter()
        .map(|entity| Candidate::deserialize(entity).map_err(Error::from))
        .collect()
}

/// The entities behind `matches`, in match order
fn select(entities: &[JsonValue], candidates: &[Candidate], matches: &[&Candidate]) -> Vec<JsonValue> {
    matches
        .iter()
        .filter_map(|matched| {
            candidates
                .iter()
                .position(|candidate| std::ptr::eq(candidate, *matched))
                .map(|index| entities[index].clone())
        })
        .collect()
}

fn take_field(data: &mut JsonValue, field: &str) -> Result<JsonValue> {
    match data.get_mut(field).map(JsonValue::take) {
        Some(JsonValue::Null) | None => Err(Error::MissingData),
        Some(value) => Ok(value),
    }
}
