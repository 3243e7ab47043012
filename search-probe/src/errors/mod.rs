//! Error types for the search probe.

use search_client::SearchClientError;
use thiserror::Error;

/// Errors that can occur while configuring or running the probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Invalid probe configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A search client call failed.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchClientError),

    /// Logging could not be set up.
    #[error("Tracing error: {0}")]
    TracingError(String),
}

impl ProbeError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a tracing error.
    pub fn tracing(msg: impl Into<String>) -> Self {
        Self::TracingError(msg.into())
    }
}
