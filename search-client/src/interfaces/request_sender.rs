//! Request sender trait definition.
//!
//! A request sender takes a fully-built [`EngineRequest`] and returns the
//! engine's response. Signing is layered on top of a plain sender by
//! decoration rather than by replacing it.

use async_trait::async_trait;

use crate::errors::SearchClientError;
use crate::types::{EngineRequest, EngineResponse};

/// Sends requests to the search engine.
///
/// Implementations return every response the engine produces, whatever its
/// status; only failures to obtain a response are reported as errors.
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Send a request and return the engine's response.
    ///
    /// # Returns
    ///
    /// * `Ok(EngineResponse)` - The response, success or not
    /// * `Err(SearchClientError)` - If the request could not be prepared or delivered
    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, SearchClientError>;
}
