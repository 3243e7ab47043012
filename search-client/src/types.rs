//! Request and response descriptors passed between the client handle and
//! its request senders.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::SearchClientError;
use crate::utils;

/// HTTP method of an engine request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Head,
}

impl Method {
    /// Upper-case method name, as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request descriptor, before and after signing.
///
/// `path` is absolute and already percent-encoded segment by segment.
/// Header names are stored lower-case so lookups and canonicalisation agree.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub method: Method,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl EngineRequest {
    /// Create a request with no query, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Attach a JSON body and the matching `content-type` header.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, SearchClientError> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| SearchClientError::serialization(e.to_string()))?;
        self.headers
            .insert("content-type".to_string(), "application/json".to_string());
        self.body = Some(bytes);
        Ok(self)
    }

    /// Add a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set a header, lower-casing its name.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by name, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The path followed by the encoded query string, if any.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, utils::encode_query(&self.query))
        }
    }
}

/// A response as returned by the engine, status and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    pub status: u16,
    pub body: String,
}

impl EngineResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success response into [`SearchClientError::Response`].
    pub fn error_for_status(self) -> Result<Self, SearchClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SearchClientError::response(self.status, self.body))
        }
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SearchClientError> {
        serde_json::from_str(&self.body).map_err(|e| SearchClientError::parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_sets_content_type() {
        let request = EngineRequest::new(Method::Post, "/users/_search")
            .json(&json!({ "query": { "match_all": {} } }))
            .unwrap();

        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"query":{"match_all":{}}}"#.as_slice())
        );
    }

    #[test]
    fn test_path_and_query() {
        let request = EngineRequest::new(Method::Post, "/users/_update_by_query")
            .query_param("refresh", "true")
            .query_param("conflicts", "proceed");

        assert_eq!(
            request.path_and_query(),
            "/users/_update_by_query?conflicts=proceed&refresh=true"
        );
        assert_eq!(EngineRequest::new(Method::Get, "/").path_and_query(), "/");
    }

    #[test]
    fn test_error_for_status() {
        assert!(EngineResponse::new(201, "{}").error_for_status().is_ok());

        let err = EngineResponse::new(409, "conflict")
            .error_for_status()
            .unwrap_err();
        assert!(matches!(
            err,
            SearchClientError::Response { status: 409, ref body } if body == "conflict"
        ));
    }

    #[test]
    fn test_json_parse_error() {
        let response = EngineResponse::new(200, "not json");
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(SearchClientError::ParseError(_))));
    }
}
