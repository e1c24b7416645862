//! Error types for the Stash client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum Error {
    /// A query referenced `...Name` but the library has no fragment `Name`
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),

    /// A library entry was appended but never declares `fragment <Name> on`
    #[error("Fragment {0} could not be resolved: its source does not declare it")]
    UnresolvableFragment(String),

    /// Connection failure or non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a GraphQL `errors` array
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    /// The response carried neither `data` nor `errors`
    #[error("GraphQL response contained no data")]
    MissingData,

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failures
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
