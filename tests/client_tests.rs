//! Integration tests for StashClient against an in-memory transport
//!
//! The mock transport answers each request from a queue of canned
//! responses and records what was sent, so tests can check both the
//! matching outcome and the exact document that would hit the wire.

use std::collections::VecDeque;
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use stash_client::fragments::{defined_fragments, referenced_fragments};
use stash_client::{
    Error, GraphQLRequest, GraphQLResponse, MatchResult, OnMultipleMatch, PerformerSearch,
    StashClient, Transport,
};

#[derive(Clone, Default)]
struct MockTransport {
    responses: Arc<Mutex<VecDeque<GraphQLResponse>>>,
    requests: Arc<Mutex<Vec<GraphQLRequest>>>,
}

impl MockTransport {
    fn respond_with(self, data: Value) -> Self {
        self.responses.lock().push_back(GraphQLResponse {
            data: Some(data),
            errors: None,
        });
        self
    }

    fn respond_with_envelope(self, envelope: Value) -> Self {
        let response = serde_json::from_value(envelope).unwrap();
        self.responses.lock().push_back(response);
        self
    }

    fn requests(&self) -> Vec<GraphQLRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: &GraphQLRequest) -> stash_client::Result<GraphQLResponse> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| Error::Transport("no canned response left".to_string()))
    }
}

fn client(transport: &MockTransport) -> StashClient {
    StashClient::new(transport.clone())
}

fn tags(tags: Value) -> Value {
    json!({ "findTags": { "count": tags.as_array().map(Vec::len), "tags": tags } })
}

// ============================================================================
// call_gql
// ============================================================================

mod call_gql {
    use super::*;

    #[tokio::test]
    async fn test_sends_resolved_document() {
        let transport = MockTransport::default().respond_with(json!({"findPerformer": null}));
        let client = client(&transport);

        client
            .call_gql(
                "query FindPerformer($id: ID!) { findPerformer(id: $id) { ...Performer } }",
                Some(json!({"id": "4"})),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0].query;
        let defined = defined_fragments(sent);
        for reference in referenced_fragments(sent) {
            assert!(defined.contains(&reference), "{reference} missing from sent document");
        }
        assert_eq!(requests[0].variables, Some(json!({"id": "4"})));
    }

    #[tokio::test]
    async fn test_unknown_fragment_sends_nothing() {
        let transport = MockTransport::default();
        let client = client(&transport);

        let result = client.call_gql("{ findThing { ...Nope } }", None).await;

        assert_matches!(result, Err(Error::UnknownFragment(name)) if name == "Nope");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_graphql_errors_are_surfaced() {
        let transport = MockTransport::default().respond_with_envelope(json!({
            "data": null,
            "errors": [{"message": "input: name must be set"}]
        }));
        let client = client(&transport);

        let result = client.call_gql("mutation { tagCreate(input: {}) { id } }", None).await;
        assert_matches!(result, Err(Error::GraphQL(messages)) if messages.len() == 1);
    }

    #[tokio::test]
    async fn test_registered_fragments_override_builtin() {
        let transport = MockTransport::default().respond_with(tags(json!([])));
        let client = client(&transport);

        let names = client.register_fragments("fragment Tag on Tag { id name }");
        assert_eq!(names, vec!["Tag".to_string()]);

        client.find_tags("anything").await.unwrap();
        let sent = &transport.requests()[0].query;
        assert!(sent.contains("fragment Tag on Tag { id name }"));
        assert!(!sent.contains("fragment SlimTag on"));
    }
}

// ============================================================================
// Finders
// ============================================================================

mod finders {
    use super::*;

    #[tokio::test]
    async fn test_find_tag_prefers_name_over_alias() {
        let transport = MockTransport::default().respond_with(tags(json!([
            {"id": "1", "name": "Beach Party", "aliases": ["beach"]},
            {"id": "2", "name": "Beach", "aliases": []}
        ])));
        let client = client(&transport);

        let result = client.find_tag("  beach ", OnMultipleMatch::ReturnNone).await.unwrap();
        assert_matches!(result, MatchResult::Single(tag) if tag["id"] == "2");
        assert_eq!(
            transport.requests()[0].variables,
            Some(json!({"filter": {"q": "beach", "per_page": -1}}))
        );
    }

    #[tokio::test]
    async fn test_find_tag_ambiguous_alias_policies() {
        let found = json!([
            {"id": "1", "name": "Outdoors", "aliases": ["Outside"]},
            {"id": "2", "name": "Exterior", "aliases": ["outside"]}
        ]);
        let transport = MockTransport::default()
            .respond_with(tags(found.clone()))
            .respond_with(tags(found.clone()))
            .respond_with(tags(found));
        let client = client(&transport);

        assert!(client.find_tag("outside", OnMultipleMatch::ReturnNone).await.unwrap().is_none());
        assert_matches!(
            client.find_tag("outside", OnMultipleMatch::ReturnFirst).await.unwrap(),
            MatchResult::Single(tag) if tag["id"] == "1"
        );
        assert_matches!(
            client.find_tag("outside", OnMultipleMatch::ReturnList).await.unwrap(),
            MatchResult::Multiple(tags) if tags.len() == 2
        );
    }

    #[tokio::test]
    async fn test_find_group_with_string_aliases() {
        let transport = MockTransport::default().respond_with(json!({
            "findGroups": {"count": 1, "groups": [
                {"id": "3", "name": "The Film", "aliases": "Film, Le Film"}
            ]}
        }));
        let client = client(&transport);

        let result = client.find_group("le film", OnMultipleMatch::default()).await.unwrap();
        assert_matches!(result, MatchResult::Single(group) if group["id"] == "3");
    }

    #[tokio::test]
    async fn test_find_performer_with_disambiguation() {
        let transport = MockTransport::default().respond_with(json!({
            "findPerformers": {"count": 2, "performers": [
                {"id": "10", "name": "Jane", "disambiguation": "1985", "alias_list": []},
                {"id": "11", "name": "Jane", "disambiguation": "1990", "alias_list": []}
            ]}
        }));
        let client = client(&transport);

        let search = PerformerSearch::new("Jane").with_disambiguation("1990");
        let result = client.find_performer(&search, OnMultipleMatch::ReturnNone).await.unwrap();
        assert_matches!(result, Some(MatchResult::Single(performer)) if performer["id"] == "11");
    }

    #[tokio::test]
    async fn test_find_performer_unparseable_aliases() {
        let transport = MockTransport::default().respond_with(json!({
            "findPerformers": {"count": 1, "performers": [
                {"id": "10", "name": "Someone", "aliases": 12}
            ]}
        }));
        let client = client(&transport);

        let result = client
            .find_performer(&PerformerSearch::new("Nobody"), OnMultipleMatch::ReturnList)
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_find_performer_no_match_is_known_empty() {
        let transport = MockTransport::default().respond_with(json!({
            "findPerformers": {"count": 1, "performers": [
                {"id": "10", "name": "Someone", "alias_list": ["Other"]}
            ]}
        }));
        let client = client(&transport);

        let result = client
            .find_performer(&PerformerSearch::new("Nobody"), OnMultipleMatch::ReturnList)
            .await
            .unwrap();
        assert_matches!(result, Some(MatchResult::None));
    }

    #[tokio::test]
    async fn test_find_tag_duplicate_ids_return_matched_entity() {
        let transport = MockTransport::default().respond_with(tags(json!([
            {"id": "1", "name": "Other", "aliases": []},
            {"id": "1", "name": "Beach", "aliases": []}
        ])));
        let client = client(&transport);

        let result = client.find_tag("beach", OnMultipleMatch::ReturnNone).await.unwrap();
        assert_matches!(result, MatchResult::Single(tag) if tag["name"] == "Beach");
    }

    #[tokio::test]
    async fn test_find_or_create_tag_creates_when_missing() {
        let transport = MockTransport::default()
            .respond_with(tags(json!([])))
            .respond_with(json!({"tagCreate": {"id": "99", "name": "New Tag", "aliases": []}}));
        let client = client(&transport);

        let tag = client.find_or_create_tag("New Tag").await.unwrap();
        assert_eq!(tag["id"], "99");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].query.contains("tagCreate"));
        assert_eq!(requests[1].variables, Some(json!({"input": {"name": "New Tag"}})));
    }

    #[tokio::test]
    async fn test_find_or_create_studio_reuses_existing() {
        let transport = MockTransport::default().respond_with(json!({
            "findStudios": {"count": 1, "studios": [
                {"id": "5", "name": "Studio X", "aliases": ["SX"]}
            ]}
        }));
        let client = client(&transport);

        let studio = client.find_or_create_studio("sx").await.unwrap();
        assert_eq!(studio["id"], "5");
        assert_eq!(transport.requests().len(), 1);
    }
}
