//! GraphQL over HTTP
//!
//! [`Transport`] is the seam between the client and the network: it takes a
//! fully resolved request and returns the server's response envelope. Tests
//! swap in an in-memory implementation.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// A GraphQL request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<JsonValue>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>, variables: Option<JsonValue>) -> Self {
        Self {
            query: query.into(),
            variables,
            operation_name: None,
        }
    }
}

/// A GraphQL error entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<JsonValue>>,
}

/// A GraphQL response envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// The `data` member, or the server's errors
    pub fn into_data(self) -> Result<JsonValue> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(Error::GraphQL(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        match self.data {
            Some(JsonValue::Null) | None => Err(Error::MissingData),
            Some(data) => Ok(data),
        }
    }
}

/// Sends a GraphQL request and returns the parsed response envelope
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &GraphQLRequest) -> Result<GraphQLResponse>;
}

/// [`Transport`] over HTTP using reqwest
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &GraphQLRequest) -> Result<GraphQLResponse> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("ApiKey", api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to reach {}: {e}", self.endpoint)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {e}")))?;
        debug!(status = %status, bytes = body.len(), "GraphQL response received");

        if !status.is_success() {
            // Validation failures come back as 422 with a normal error envelope
            if let Ok(envelope) = serde_json::from_str::<GraphQLResponse>(&body) {
                if envelope.has_errors() {
                    return Ok(envelope);
                }
            }
            return Err(Error::transport(format!(
                "{} returned status {}: {}",
                self.endpoint, status, body
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
