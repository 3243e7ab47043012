//! Integration tests for the probe run.
//!
//! These tests use the real document service with a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use search_client::{
    ClientMode, DocumentService, EngineRequest, EngineResponse, Method, RequestSender,
    SearchClient, SearchClientError,
};
use search_probe::{run, ProbeConfig, ProbeError};
use serde_json::json;
use url::Url;

// Mock transport answering from a script
#[derive(Default)]
struct ScriptedSender {
    requests: Mutex<Vec<EngineRequest>>,
    responses: Mutex<VecDeque<EngineResponse>>,
}

impl ScriptedSender {
    fn then(self: Arc<Self>, status: u16, body: &str) -> Arc<Self> {
        self.responses
            .lock()
            .unwrap()
            .push_back(EngineResponse::new(status, body));
        self
    }
}

#[async_trait::async_trait]
impl RequestSender for ScriptedSender {
    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, SearchClientError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SearchClientError::transport("no scripted response"))
    }
}

const INFO: &str = r#"{"name":"node-1","cluster_name":"search","version":{"number":"2.11.0","distribution":"opensearch"}}"#;
const SEARCH: &str = r#"{"took":2,"timed_out":false,"hits":{"total":{"value":1,"relation":"eq"},"hits":[{"_index":"users","_id":"3","_score":1.2,"_source":{"name":"juanse","age":21}}]}}"#;

fn service(sender: Arc<ScriptedSender>) -> DocumentService {
    DocumentService::with_client(SearchClient::new(
        sender,
        Url::parse("http://localhost:9200").unwrap(),
        ClientMode::Local,
    ))
}

fn probe(doc_id: Option<&str>) -> ProbeConfig {
    ProbeConfig {
        index: "users".to_string(),
        query: "juanse".to_string(),
        fields: vec!["name".to_string()],
        doc_id: doc_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_probe_reports_cluster_and_hits() {
    let sender = Arc::new(ScriptedSender::default())
        .then(200, INFO)
        .then(200, SEARCH);

    let report = run(&service(sender.clone()), &probe(None)).await.unwrap();

    assert_eq!(report.cluster_name, "search");
    assert_eq!(report.version, "2.11.0");
    assert_eq!(report.took_ms, 2);
    assert_eq!(report.hits, vec![json!({ "name": "juanse", "age": 21 })]);
    assert_eq!(report.document, None);

    let requests = sender.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/");
    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[1].path, "/users/_search");
}

#[tokio::test]
async fn test_probe_fetches_requested_document() {
    let sender = Arc::new(ScriptedSender::default())
        .then(200, INFO)
        .then(200, SEARCH)
        .then(200, "")
        .then(200, r#"{"name":"juanse","age":21}"#);

    let report = run(&service(sender.clone()), &probe(Some("3")))
        .await
        .unwrap();

    assert_eq!(report.document, Some(json!({ "name": "juanse", "age": 21 })));
    let requests = sender.requests.lock().unwrap();
    assert_eq!(requests[2].method, Method::Head);
    assert_eq!(requests[3].path, "/users/_source/3");
}

#[tokio::test]
async fn test_probe_missing_document_is_not_an_error() {
    let sender = Arc::new(ScriptedSender::default())
        .then(200, INFO)
        .then(200, SEARCH)
        .then(404, "");

    let report = run(&service(sender), &probe(Some("99"))).await.unwrap();

    assert_eq!(report.document, None);
}

#[tokio::test]
async fn test_probe_search_failure_propagates() {
    let sender = Arc::new(ScriptedSender::default())
        .then(200, INFO)
        .then(404, r#"{"error":{"type":"index_not_found_exception"}}"#);

    let result = run(&service(sender), &probe(None)).await;

    match result {
        Err(ProbeError::SearchError(e)) => assert_eq!(e.status(), Some(404)),
        other => panic!("expected a search error, got {:?}", other),
    }
}
