//! # Search Shared
//!
//! This crate defines the data structures exchanged with the search client
//! wrapper: document references, insert/update payloads, search and
//! by-query requests, and the engine responses they produce.

pub mod types;

pub use types::document::{DocRef, InsertDoc, UpdateDoc};
pub use types::query::{ByQueryRequest, Conflicts, SearchRequest};
pub use types::response::{
    ByQueryResponse, ClusterInfo, ClusterVersion, GetResponse, Hit, Hits, SearchResponse,
    TotalHits, WriteResponse,
};
