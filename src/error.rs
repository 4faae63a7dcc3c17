//! Error types for mr-roundup

use thiserror::Error;

/// Result type for mr-roundup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while gathering merge requests
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration is missing, unreadable, malformed or incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// A merge request query failed
    ///
    /// `context` names the scope and filter of the failing query so the
    /// user can re-run with narrower flags.
    #[error("query failed for {context}: {message}")]
    Query {
        /// Scope and filter of the failing query
        context: String,
        /// Underlying failure
        message: String,
    },

    /// Opening a merge request in the browser failed
    #[error("failed to open {url} in the browser: {message}")]
    BrowserOpen {
        /// URL that could not be opened
        url: String,
        /// Underlying failure
        message: String,
    },

    /// No usable access token
    #[error("authentication error: {0}")]
    Auth(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a query error from any displayable failure
    pub fn query(context: impl std::fmt::Display, message: impl std::fmt::Display) -> Self {
        Self::Query {
            context: context.to_string(),
            message: message.to_string(),
        }
    }
}
