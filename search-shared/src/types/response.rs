//! Engine response types.
//!
//! These mirror the JSON the engine returns; metadata fields keep their
//! leading-underscore names on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of single-document writes (create, update, delete).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WriteResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    /// `created`, `updated`, `deleted`, `noop` or `not_found`.
    pub result: String,
    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<u64>,
    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<u64>,
}

/// A document fetched together with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetResponse<T> {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<u64>,
    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<u64>,
    pub found: bool,
    #[serde(rename = "_source", default = "Option::default")]
    pub source: Option<T>,
}

/// Total hit count of a search.
///
/// Newer engines report an object with a relation; Elasticsearch 6 and
/// `rest_total_hits_as_int=true` report a bare integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Detailed {
        value: u64,
        /// `eq` or `gte`.
        relation: String,
    },
}

impl TotalHits {
    /// The hit count, whichever form the engine used.
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) => *value,
            TotalHits::Detailed { value, .. } => *value,
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hit<T> {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default = "Option::default")]
    pub source: Option<T>,
}

/// The `hits` section of a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hits<T> {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

/// Complete search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse<T> {
    /// Time taken to execute the search in milliseconds.
    pub took: u64,
    pub timed_out: bool,
    pub hits: Hits<T>,
    /// Aggregation results, untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

impl<T> SearchResponse<T> {
    /// Iterate over the `_source` of every hit that carries one.
    pub fn sources(&self) -> impl Iterator<Item = &T> {
        self.hits.hits.iter().filter_map(|hit| hit.source.as_ref())
    }
}

/// Response of update-by-query and delete-by-query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByQueryResponse {
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    /// Number of documents matched.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub updated: Option<u64>,
    #[serde(default)]
    pub deleted: Option<u64>,
    #[serde(default)]
    pub version_conflicts: u64,
    #[serde(default = "Vec::new")]
    pub failures: Vec<Value>,
}

/// Version block of the cluster info response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterVersion {
    pub number: String,
    /// `opensearch` for OpenSearch; absent on Elasticsearch.
    #[serde(default)]
    pub distribution: Option<String>,
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterInfo {
    pub name: String,
    pub cluster_name: String,
    #[serde(default)]
    pub cluster_uuid: Option<String>,
    pub version: ClusterVersion,
    #[serde(default)]
    pub tagline: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn test_get_response_found() {
        let response: GetResponse<User> = serde_json::from_value(json!({
            "_index": "users",
            "_id": "4",
            "_version": 1,
            "_seq_no": 3,
            "_primary_term": 1,
            "found": true,
            "_source": { "name": "Gabriel", "age": 28 }
        }))
        .unwrap();

        assert!(response.found);
        assert_eq!(response.id, "4");
        assert_eq!(
            response.source,
            Some(User {
                name: "Gabriel".to_string(),
                age: 28
            })
        );
    }

    #[test]
    fn test_get_response_not_found_has_no_source() {
        let response: GetResponse<User> = serde_json::from_value(json!({
            "_index": "users",
            "_id": "99",
            "found": false
        }))
        .unwrap();

        assert!(!response.found);
        assert!(response.source.is_none());
        assert!(response.version.is_none());
    }

    #[test]
    fn test_search_response_sources() {
        let response: SearchResponse<User> = serde_json::from_value(json!({
            "took": 5,
            "timed_out": false,
            "hits": {
                "total": { "value": 1, "relation": "eq" },
                "max_score": 1.2,
                "hits": [
                    {
                        "_index": "users",
                        "_id": "3",
                        "_score": 1.2,
                        "_source": { "name": "juanse", "age": 21 }
                    }
                ]
            }
        }))
        .unwrap();

        let names: Vec<&str> = response.sources().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["juanse"]);
        assert_eq!(response.hits.total.unwrap().value(), 1);
    }

    #[test]
    fn test_total_hits_accepts_integer_and_object() {
        let legacy: Hits<User> = serde_json::from_value(json!({ "total": 7, "hits": [] })).unwrap();
        let current: Hits<User> = serde_json::from_value(json!({
            "total": { "value": 10000, "relation": "gte" },
            "hits": []
        }))
        .unwrap();

        assert_eq!(legacy.total, Some(TotalHits::Count(7)));
        assert_eq!(
            current.total,
            Some(TotalHits::Detailed {
                value: 10000,
                relation: "gte".to_string()
            })
        );
        assert_eq!(current.total.unwrap().value(), 10000);
    }

    #[test]
    fn test_by_query_response_defaults() {
        let response: ByQueryResponse = serde_json::from_value(json!({
            "took": 12,
            "total": 2,
            "deleted": 2
        }))
        .unwrap();

        assert_eq!(response.deleted, Some(2));
        assert!(response.updated.is_none());
        assert!(response.failures.is_empty());
    }

    #[test]
    fn test_cluster_info_opensearch() {
        let info: ClusterInfo = serde_json::from_value(json!({
            "name": "node-1",
            "cluster_name": "docker-cluster",
            "cluster_uuid": "abc",
            "version": { "distribution": "opensearch", "number": "2.11.0" },
            "tagline": "The OpenSearch Project: https://opensearch.org/"
        }))
        .unwrap();

        assert_eq!(info.version.distribution.as_deref(), Some("opensearch"));
        assert_eq!(info.version.number, "2.11.0");
    }
}
