//! Search and by-query request types.
//!
//! Query bodies are kept as raw JSON: the wrapper forwards them to the
//! engine unchanged and does not model the query DSL.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A search against one index, or all indices when `index` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// Target index; `None` searches every index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// The search body (query, size, from, sort, aggregations, ...).
    pub body: Value,
}

impl SearchRequest {
    /// Search `index` with an arbitrary body.
    pub fn new(index: impl Into<String>, body: Value) -> Self {
        Self {
            index: Some(index.into()),
            body,
        }
    }

    /// Search every index with an arbitrary body.
    pub fn all_indices(body: Value) -> Self {
        Self { index: None, body }
    }

    /// Build a `simple_query_string` search over the given fields.
    ///
    /// # Example
    ///
    /// ```
    /// use search_shared::SearchRequest;
    ///
    /// let request = SearchRequest::simple_query_string("users", "juanse", &["name"]);
    /// assert_eq!(request.body["query"]["simple_query_string"]["query"], "juanse");
    /// ```
    pub fn simple_query_string(
        index: impl Into<String>,
        query: impl Into<String>,
        fields: &[&str],
    ) -> Self {
        Self::new(
            index,
            json!({
                "query": {
                    "simple_query_string": {
                        "query": query.into(),
                        "fields": fields,
                    }
                }
            }),
        )
    }
}

/// How by-query operations react to version conflicts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Conflicts {
    /// Abort the operation on the first conflict.
    #[default]
    Abort,
    /// Count conflicts and keep going.
    Proceed,
}

impl Conflicts {
    /// The value sent in the `conflicts` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Conflicts::Abort => "abort",
            Conflicts::Proceed => "proceed",
        }
    }
}

/// An update-by-query or delete-by-query request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByQueryRequest {
    /// The index to operate on.
    pub index: String,

    /// The query selecting documents.
    pub query: Value,

    /// Update script; ignored by delete-by-query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Value>,

    /// Conflict handling. `None` leaves the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Conflicts>,

    /// Refresh affected shards once the operation completes.
    #[serde(default)]
    pub refresh: bool,
}

impl ByQueryRequest {
    /// Create a request selecting documents of `index` with `query`.
    pub fn new(index: impl Into<String>, query: Value) -> Self {
        Self {
            index: index.into(),
            query,
            script: None,
            conflicts: None,
            refresh: false,
        }
    }

    /// Attach an update script.
    pub fn with_script(mut self, script: Value) -> Self {
        self.script = Some(script);
        self
    }

    /// Set conflict handling.
    pub fn with_conflicts(mut self, conflicts: Conflicts) -> Self {
        self.conflicts = Some(conflicts);
        self
    }

    /// Refresh affected shards after the operation.
    pub fn with_refresh(mut self) -> Self {
        self.refresh = true;
        self
    }

    /// The JSON body sent to the engine.
    pub fn body(&self) -> Value {
        let mut body = json!({ "query": self.query });
        if let Some(ref script) = self.script {
            body["script"] = script.clone();
        }
        body
    }
}
