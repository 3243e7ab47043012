//! # Search Client
//!
//! This crate provides a lazily provisioned client for OpenSearch and
//! Elasticsearch clusters, and a document service on top of it.
//!
//! In local mode requests go straight to the configured (or default
//! `http://localhost:9200`) endpoint. In remote mode every request is signed
//! with AWS Signature Version 4 before it is sent, using credentials resolved
//! once when the client is built and refreshed according to the configured
//! [`CredentialRefresh`] policy.

pub mod client;
pub mod config;
pub mod connection;
pub mod credentials;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod provider;
pub mod service;
pub mod signing;
pub mod types;
pub mod utils;

pub use client::SearchClient;
pub use config::{BasicAuth, ClientConfig, ClientMode, CredentialsSource};
pub use connection::{build_signed_connection, SignedConnection, SigningSender};
pub use credentials::{
    CredentialCache, CredentialRefresh, Credentials, EnvironmentCredentialsProvider,
    StaticCredentialsProvider,
};
#[cfg(feature = "aws-auth")]
pub use credentials::DefaultChainCredentialsProvider;
pub use errors::SearchClientError;
pub use interfaces::{CredentialsProvider, RequestSender};
pub use opensearch::HttpSender;
pub use provider::ClientProvider;
pub use service::DocumentService;
pub use signing::SigV4Signer;
pub use types::{EngineRequest, EngineResponse, Method};

pub use search_shared::{
    ByQueryRequest, ByQueryResponse, ClusterInfo, Conflicts, DocRef, GetResponse, InsertDoc,
    SearchRequest, SearchResponse, UpdateDoc, WriteResponse,
};
