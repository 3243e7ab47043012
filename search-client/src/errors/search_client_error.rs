//! Search client error types.
//!
//! This module defines the unified error type for every search client
//! operation, from configuration and credential resolution down to the
//! engine's own non-success responses.

use thiserror::Error;

/// Unified errors from search client operations.
///
/// Engine failures are not translated: a non-success status is surfaced as
/// [`SearchClientError::Response`] carrying the status code and the raw body
/// the engine returned.
#[derive(Debug, Clone, Error)]
pub enum SearchClientError {
    /// Validation error (e.g., empty index name or document id).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing or invalid configuration (e.g., no remote endpoint).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No identity could be resolved by the credentials provider.
    #[error("Credential resolution error: {0}")]
    CredentialResolutionError(String),

    /// A request could not be signed.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Failed to set up the connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request failed before a response was received.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The engine answered with a non-success status.
    #[error("Engine responded with status {status}: {body}")]
    Response { status: u16, body: String },

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchClientError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a credential resolution error.
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::CredentialResolutionError(msg.into())
    }

    /// Create a signing error.
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::SigningError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create an engine response error.
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Self::Response {
            status,
            body: body.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// The engine status code, when the error is an engine response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<opensearch::Error> for SearchClientError {
    fn from(err: opensearch::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
