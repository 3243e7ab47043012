//! Error types for the search client.
//!
//! This module provides a unified error type for configuration, credential,
//! signing and transport failures.

mod search_client_error;

pub use search_client_error::SearchClientError;
