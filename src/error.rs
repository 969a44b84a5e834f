//! Error types shared by the fetch pipeline, graph queries, and chat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a user can see. Each variant renders as a single message.
///
/// Variants carry only strings so that recorded cassettes can replay an
/// error as the same kind it was captured as.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Error {
    /// Malformed repository URL or other bad user input.
    #[error("{0}")]
    InvalidInput(String),

    /// Repository or its contents are absent.
    #[error("{0}")]
    NotFound(String),

    /// The credential was rejected.
    #[error("{0}")]
    Auth(String),

    /// The provider truncated the tree listing.
    #[error("Repository is too large to visualize completely. Please try a smaller repository.")]
    TruncatedRepository,

    /// The tree listing had no entries.
    #[error("No files found in the repository")]
    EmptyRepository,

    /// A query referenced a node id that is not in the graph.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Any other non-success response or transport failure from a remote call.
    #[error("{0}")]
    ExternalService(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cassette could not be read, parsed, or written.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// Command output could not be produced or written.
    #[error("Failed to write output: {0}")]
    Output(String),
}

impl Error {
    /// Message shown when a credential is rejected.
    pub(crate) fn auth_failed() -> Self {
        Self::Auth("Authentication failed. Please check your GitHub token.".into())
    }
}
