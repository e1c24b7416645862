//! Client configuration

use std::env;

use url::Url;

use crate::error::{Error, Result};

const DEFAULT_URL: &str = "http://localhost:9999/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a Stash server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint, always ending in `/graphql`
    pub url: Url,

    /// Sent as the `ApiKey` header when set
    pub api_key: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Build a config for `url`. A server root such as
    /// `http://host:9999` gets `/graphql` appended.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: graphql_endpoint(url)?,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from environment variables (and `.env`, if present)
    ///
    /// - `STASH_URL`: server or endpoint URL (default `http://localhost:9999/graphql`)
    /// - `STASH_API_KEY`: optional API key
    /// - `STASH_TIMEOUT_SECS`: request timeout (default 30)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("STASH_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

        let timeout_secs = match env::var("STASH_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::config(format!("Invalid STASH_TIMEOUT_SECS: {raw}")))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            url: graphql_endpoint(&url)?,
            api_key: env::var("STASH_API_KEY").ok().filter(|key| !key.is_empty()),
            timeout_secs,
        })
    }
}

/// Parse `raw` and make sure its path ends in `/graphql`
fn graphql_endpoint(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| Error::config(format!("Invalid server URL {raw}: {e}")))?;

    if !url.path().trim_end_matches('/').ends_with("/graphql") {
        let path = format!("{}/graphql", url.path().trim_end_matches('/'));
        url.set_path(&path);
    }
    Ok(url)
}
