// Error types for the client and its configuration.
//
// Only faults the client cannot turn into a fallback value show up here.
// Empty or malformed response bodies never produce an `ApiError`; see
// [`crate::normalize`].

use thiserror::Error;

/// Faults raised by [`crate::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached at all (refused, DNS, ...).
    #[error("Cannot connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The request failed after the connection was made, including a body
    /// that stopped arriving halfway through.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The session token contains bytes that are not allowed in a header.
    #[error("Session token cannot be sent as a bearer credential")]
    InvalidToken,
    /// A required credential field was left empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}
