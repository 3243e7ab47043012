//! Document service implementation.
//!
//! This module provides the wrapper application code uses for document CRUD
//! and queries. Each operation obtains the client from the provider (building
//! it on first use) and forwards exactly one request.
//!
//! Responses are passed through: a non-success status becomes
//! [`SearchClientError::Response`] with the engine's status and body as-is.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use search_shared::{
    ByQueryRequest, ByQueryResponse, ClusterInfo, DocRef, GetResponse, InsertDoc, SearchRequest,
    SearchResponse, UpdateDoc, WriteResponse,
};

use crate::client::SearchClient;
use crate::errors::SearchClientError;
use crate::provider::ClientProvider;
use crate::types::{EngineRequest, EngineResponse, Method};
use crate::utils;

/// Body of a partial update.
#[derive(Serialize)]
struct PartialUpdate<'a, T> {
    doc: &'a T,
}

/// The main service for document operations against the search engine.
///
/// # Example
///
/// ```no_run
/// use search_client::{ClientConfig, ClientProvider, DocumentService};
/// use search_shared::{DocRef, InsertDoc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = DocumentService::new(ClientProvider::new(ClientConfig::local()));
///
/// service
///     .insert_one(&InsertDoc::new("users", "1", User { name: "Javier".into(), age: 30 }))
///     .await?;
///
/// let user: User = service
///     .get_one_doc_by_id_without_metadata(&DocRef::new("users", "1"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DocumentService {
    provider: Arc<ClientProvider>,
}

impl DocumentService {
    /// Create a service backed by `provider`.
    pub fn new(provider: ClientProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Create a service sharing an existing provider.
    pub fn from_shared(provider: Arc<ClientProvider>) -> Self {
        Self { provider }
    }

    /// Create a service configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientProvider::from_env())
    }

    /// Create a service around an already-built client.
    pub fn with_client(client: impl Into<Arc<SearchClient>>) -> Self {
        Self::new(ClientProvider::with_client(client))
    }

    pub fn provider(&self) -> &ClientProvider {
        &self.provider
    }

    /// The client, if it has been built or injected.
    pub fn client(&self) -> Option<Arc<SearchClient>> {
        self.provider.current_client()
    }

    /// Send through the lazily built client, returning any status.
    async fn execute(&self, request: EngineRequest) -> Result<EngineResponse, SearchClientError> {
        let client = self.provider.get_client().await?;
        client.send(request).await
    }

    /// Send and require a 2xx status.
    async fn execute_checked(
        &self,
        request: EngineRequest,
    ) -> Result<EngineResponse, SearchClientError> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.execute(request).await?;
        if !response.is_success() {
            error!(
                method = %method,
                path = %path,
                status = response.status,
                body = %response.body,
                "Search request failed"
            );
        }
        response.error_for_status()
    }

    /// Check whether a document exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - For 2xx / 404 responses
    /// * `Err(SearchClientError)` - For any other status or failure
    #[instrument(skip(self), fields(index = %doc.index, id = %doc.id))]
    pub async fn is_existed_doc(&self, doc: &DocRef) -> Result<bool, SearchClientError> {
        let path = utils::document_path(&doc.index, "_doc", &doc.id)?;
        let response = self.execute(EngineRequest::new(Method::Head, path)).await?;

        match response.status {
            404 => Ok(false),
            _ => response.error_for_status().map(|_| true),
        }
    }

    /// Create a document; fails with a 409 response if the id is taken.
    #[instrument(skip(self, data), fields(index = %data.index, id = %data.id))]
    pub async fn insert_one<T: Serialize>(
        &self,
        data: &InsertDoc<T>,
    ) -> Result<WriteResponse, SearchClientError> {
        let path = utils::document_path(&data.index, "_create", &data.id)?;
        let request = EngineRequest::new(Method::Put, path).json(&data.doc)?;

        let result: WriteResponse = self.execute_checked(request).await?.json()?;
        debug!(result = %result.result, "Document inserted");
        Ok(result)
    }

    /// Fetch a document with its metadata.
    #[instrument(skip(self), fields(index = %doc.index, id = %doc.id))]
    pub async fn get_one_doc_by_id_with_metadata<T: DeserializeOwned>(
        &self,
        doc: &DocRef,
    ) -> Result<GetResponse<T>, SearchClientError> {
        let path = utils::document_path(&doc.index, "_doc", &doc.id)?;
        self.execute_checked(EngineRequest::new(Method::Get, path))
            .await?
            .json()
    }

    /// Fetch only a document's source.
    #[instrument(skip(self), fields(index = %doc.index, id = %doc.id))]
    pub async fn get_one_doc_by_id_without_metadata<T: DeserializeOwned>(
        &self,
        doc: &DocRef,
    ) -> Result<T, SearchClientError> {
        let path = utils::document_path(&doc.index, "_source", &doc.id)?;
        self.execute_checked(EngineRequest::new(Method::Get, path))
            .await?
            .json()
    }

    /// Run a search.
    #[instrument(skip(self, request), fields(index = ?request.index))]
    pub async fn search<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse<T>, SearchClientError> {
        let path = utils::index_path(request.index.as_deref(), "_search")?;
        let request = EngineRequest::new(Method::Post, path).json(&request.body)?;

        let result: SearchResponse<T> = self.execute_checked(request).await?.json()?;
        debug!(
            took_ms = result.took,
            hits = result.hits.hits.len(),
            "Search completed"
        );
        Ok(result)
    }

    /// Partially update a document with the fields in `data.doc`.
    #[instrument(skip(self, data), fields(index = %data.index, id = %data.id))]
    pub async fn update_one_doc_by_id<T: Serialize>(
        &self,
        data: &UpdateDoc<T>,
    ) -> Result<WriteResponse, SearchClientError> {
        let path = utils::document_path(&data.index, "_update", &data.id)?;
        let request =
            EngineRequest::new(Method::Post, path).json(&PartialUpdate { doc: &data.doc })?;

        let result: WriteResponse = self.execute_checked(request).await?.json()?;
        debug!(result = %result.result, "Document updated");
        Ok(result)
    }

    /// Update every document matching a query.
    #[instrument(skip(self, data), fields(index = %data.index))]
    pub async fn update_many_docs_by_query(
        &self,
        data: &ByQueryRequest,
    ) -> Result<ByQueryResponse, SearchClientError> {
        let path = utils::index_path(Some(&data.index), "_update_by_query")?;
        let request = Self::by_query_request(path, data)?;

        let result: ByQueryResponse = self.execute_checked(request).await?.json()?;
        debug!(updated = ?result.updated, total = result.total, "Update by query completed");
        Ok(result)
    }

    /// Delete a document.
    #[instrument(skip(self), fields(index = %doc.index, id = %doc.id))]
    pub async fn delete_one_doc_by_id(&self, doc: &DocRef) -> Result<WriteResponse, SearchClientError> {
        let path = utils::document_path(&doc.index, "_doc", &doc.id)?;
        self.execute_checked(EngineRequest::new(Method::Delete, path))
            .await?
            .json()
    }

    /// Delete every document matching a query. Any script is ignored.
    #[instrument(skip(self, data), fields(index = %data.index))]
    pub async fn delete_many_docs_by_query(
        &self,
        data: &ByQueryRequest,
    ) -> Result<ByQueryResponse, SearchClientError> {
        let path = utils::index_path(Some(&data.index), "_delete_by_query")?;
        let query_only = ByQueryRequest {
            script: None,
            ..data.clone()
        };
        let request = Self::by_query_request(path, &query_only)?;

        let result: ByQueryResponse = self.execute_checked(request).await?.json()?;
        debug!(deleted = ?result.deleted, total = result.total, "Delete by query completed");
        Ok(result)
    }

    /// Cluster name and version.
    #[instrument(skip(self))]
    pub async fn info(&self) -> Result<ClusterInfo, SearchClientError> {
        self.execute_checked(EngineRequest::new(Method::Get, "/"))
            .await?
            .json()
    }

    /// Cluster health, as returned by the engine.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<Value, SearchClientError> {
        self.execute_checked(EngineRequest::new(Method::Get, "/_cluster/health"))
            .await?
            .json()
    }

    /// Whether the engine answers `HEAD /` with a success status.
    ///
    /// Never fails: any error, including a failure to build the client, is
    /// reported as `false`.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> bool {
        match self.execute(EngineRequest::new(Method::Head, "/")).await {
            Ok(response) => response.is_success(),
            Err(e) => {
                debug!(error = %e, "Ping failed");
                false
            }
        }
    }

    fn by_query_request(
        path: String,
        data: &ByQueryRequest,
    ) -> Result<EngineRequest, SearchClientError> {
        let mut request = EngineRequest::new(Method::Post, path).json(&data.body())?;
        if let Some(conflicts) = data.conflicts {
            request = request.query_param("conflicts", conflicts.as_str());
        }
        if data.refresh {
            request = request.query_param("refresh", "true");
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_shared::Conflicts;
    use serde_json::json;

    #[test]
    fn test_by_query_request_params() {
        let data = ByQueryRequest::new("users", json!({ "match_all": {} }))
            .with_conflicts(Conflicts::Proceed)
            .with_refresh();

        let request =
            DocumentService::by_query_request("/users/_update_by_query".to_string(), &data)
                .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.path_and_query(),
            "/users/_update_by_query?conflicts=proceed&refresh=true"
        );
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"query":{"match_all":{}}}"#.as_slice())
        );
    }

    #[test]
    fn test_by_query_request_without_params() {
        let data = ByQueryRequest::new("users", json!({ "match_all": {} }));

        let request =
            DocumentService::by_query_request("/users/_delete_by_query".to_string(), &data)
                .unwrap();

        assert!(request.query.is_empty());
    }

    #[test]
    fn test_partial_update_body() {
        let body = serde_json::to_value(PartialUpdate {
            doc: &json!({ "age": 31 }),
        })
        .unwrap();

        assert_eq!(body, json!({ "doc": { "age": 31 } }));
    }
}
