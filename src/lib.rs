//! Stash client - GraphQL SDK for Stash media servers
//!
//! Two pieces do the real work:
//!
//! - [`fragments`]: a library of named GraphQL fragments and the resolver
//!   that inlines every fragment a document references before it is sent.
//! - [`matching`]: name/alias matching that turns the server's loose
//!   free-text search results into the entity the caller meant.
//!
//! [`StashClient`] ties them to a [`Transport`](transport::Transport).
//!
//! ```rust,ignore
//! use stash_client::{ClientConfig, OnMultipleMatch, StashClient};
//!
//! let client = StashClient::from_config(&ClientConfig::from_env()?)?;
//! let tag = client.find_tag("Outdoor", OnMultipleMatch::ReturnFirst).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fragments;
pub mod logging;
pub mod matching;
pub mod transport;

pub use client::StashClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use fragments::{FragmentDefinition, FragmentLibrary};
pub use logging::{LogFormat, init_logging};
pub use matching::{Candidate, EntityId, MatchResult, OnMultipleMatch, PerformerSearch};
pub use transport::{GraphQLRequest, GraphQLResponse, HttpTransport, Transport};
