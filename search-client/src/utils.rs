//! Utility functions for building request paths and query strings.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::errors::SearchClientError;

/// Everything except the RFC 3986 unreserved characters.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a string using the RFC 3986 unreserved set.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is encoded as `%XX` with
/// upper-case hex digits.
///
/// # Example
///
/// ```
/// use search_client::utils::uri_encode;
///
/// assert_eq!(uri_encode("a b/c"), "a%20b%2Fc");
/// ```
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Encode query parameters as `k=v&k=v`, in key order.
pub fn encode_query(query: &BTreeMap<String, String>) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Validate that an index name or document id is usable in a path.
///
/// `.` and `..` are rejected: URL resolution treats them (and their
/// percent-encoded forms) as dot segments, so they cannot reach the engine
/// as literal path segments.
fn validate_segment(field_name: &str, value: &str) -> Result<(), SearchClientError> {
    if value.is_empty() {
        return Err(SearchClientError::validation(format!(
            "{} is required",
            field_name
        )));
    }
    if value == "." || value == ".." {
        return Err(SearchClientError::validation(format!(
            "{} cannot be '{}'",
            field_name, value
        )));
    }
    Ok(())
}

/// Build `/{index}/{endpoint}/{id}` with every dynamic segment encoded.
///
/// # Returns
///
/// * `Ok(String)` - The absolute, encoded path
/// * `Err(SearchClientError)` - If `index` or `id` is empty
pub fn document_path(index: &str, endpoint: &str, id: &str) -> Result<String, SearchClientError> {
    validate_segment("index", index)?;
    validate_segment("id", id)?;
    Ok(format!("/{}/{}/{}", uri_encode(index), endpoint, uri_encode(id)))
}

/// Build `/{index}/{endpoint}`, or `/{endpoint}` when no index is given.
pub fn index_path(index: Option<&str>, endpoint: &str) -> Result<String, SearchClientError> {
    match index {
        Some(index) => {
            validate_segment("index", index)?;
            Ok(format!("/{}/{}", uri_encode(index), endpoint))
        }
        None => Ok(format!("/{}", endpoint)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_encode_unreserved_untouched() {
        assert_eq!(uri_encode("AZaz09-_.~"), "AZaz09-_.~");
    }

    #[test]
    fn test_uri_encode_reserved() {
        assert_eq!(uri_encode("a b"), "a%20b");
        assert_eq!(uri_encode("a/b"), "a%2Fb");
        assert_eq!(uri_encode("100%"), "100%25");
        assert_eq!(uri_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_encode_query_sorted() {
        let mut query = BTreeMap::new();
        query.insert("refresh".to_string(), "true".to_string());
        query.insert("conflicts".to_string(), "proceed".to_string());
        query.insert("q".to_string(), "name:a b".to_string());

        assert_eq!(
            encode_query(&query),
            "conflicts=proceed&q=name%3Aa%20b&refresh=true"
        );
    }

    #[test]
    fn test_document_path() {
        assert_eq!(
            document_path("users", "_doc", "1").unwrap(),
            "/users/_doc/1"
        );
        assert_eq!(
            document_path("users", "_source", "a/b").unwrap(),
            "/users/_source/a%2Fb"
        );
    }

    #[test]
    fn test_document_path_rejects_empty() {
        assert!(matches!(
            document_path("", "_doc", "1"),
            Err(SearchClientError::ValidationError(_))
        ));
        assert!(matches!(
            document_path("users", "_doc", ""),
            Err(SearchClientError::ValidationError(_))
        ));
    }

    #[test]
    fn test_document_path_rejects_dot_segments() {
        for id in [".", ".."] {
            assert!(matches!(
                document_path("users", "_doc", id),
                Err(SearchClientError::ValidationError(_))
            ));
        }
        assert!(index_path(Some(".."), "_search").is_err());

        assert_eq!(
            document_path("users", "_doc", "...").unwrap(),
            "/users/_doc/..."
        );
        assert_eq!(
            document_path("users", "_doc", "../x").unwrap(),
            "/users/_doc/..%2Fx"
        );
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path(Some("users"), "_search").unwrap(), "/users/_search");
        assert_eq!(index_path(None, "_search").unwrap(), "/_search");
        assert!(index_path(Some(""), "_search").is_err());
    }
}
