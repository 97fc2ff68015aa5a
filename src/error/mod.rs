//! Error types for the Agent Builder CLI.

use thiserror::Error;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum AgentCliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AgentCliError {
    /// Create an API error carrying the response body for diagnostics.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AgentCliError>;
