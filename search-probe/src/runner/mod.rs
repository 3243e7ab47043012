//! The probe run: cluster info, a sample search and an optional lookup.

use search_client::{DocRef, DocumentService, SearchRequest};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::ProbeError;

/// What a probe run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub cluster_name: String,
    pub version: String,
    pub took_ms: u64,
    pub hits: Vec<Value>,
    pub document: Option<Value>,
}

/// Run the probe against `service`.
///
/// # Returns
///
/// * `Ok(ProbeReport)` - If every call succeeded
/// * `Err(ProbeError)` - On the first failing call
pub async fn run(service: &DocumentService, probe: &ProbeConfig) -> Result<ProbeReport, ProbeError> {
    let cluster = service.info().await?;
    info!(
        cluster_name = %cluster.cluster_name,
        version = %cluster.version.number,
        distribution = ?cluster.version.distribution,
        "Connected to cluster"
    );

    let fields: Vec<&str> = probe.fields.iter().map(String::as_str).collect();
    let request = SearchRequest::simple_query_string(&probe.index, &probe.query, &fields);
    let response = service.search::<Value>(&request).await?;

    let hits: Vec<Value> = response.sources().cloned().collect();
    info!(
        index = %probe.index,
        query = %probe.query,
        took_ms = response.took,
        hits = hits.len(),
        "Search completed"
    );
    for hit in &hits {
        info!(source = %hit, "Hit");
    }

    let document = match &probe.doc_id {
        Some(id) => {
            let doc = DocRef::new(probe.index.clone(), id.clone());
            if service.is_existed_doc(&doc).await? {
                let source: Value = service.get_one_doc_by_id_without_metadata(&doc).await?;
                info!(id = %id, source = %source, "Fetched document");
                Some(source)
            } else {
                warn!(id = %id, index = %probe.index, "Document not found");
                None
            }
        }
        None => None,
    };

    Ok(ProbeReport {
        cluster_name: cluster.cluster_name,
        version: cluster.version.number,
        took_ms: response.took,
        hits,
        document,
    })
}
