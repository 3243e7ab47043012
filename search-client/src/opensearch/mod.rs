//! OpenSearch transport for the search client.
//!
//! This module provides the plain, unsigned [`crate::RequestSender`] backed
//! by the `opensearch` crate's HTTP transport.

mod http_sender;

pub use http_sender::HttpSender;
