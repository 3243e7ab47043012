//! Dependency initialization and wiring for the search probe.

use std::env;

use search_client::{ClientConfig, ClientProvider, DocumentService};
use tracing::info;

use crate::ProbeError;

/// Default index searched by the probe.
const DEFAULT_PROBE_INDEX: &str = "users";

/// Default `simple_query_string` query.
const DEFAULT_PROBE_QUERY: &str = "juanse";

/// Default comma-separated list of fields to search.
const DEFAULT_PROBE_FIELDS: &str = "name";

/// What the probe looks up once connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub index: String,
    pub query: String,
    pub fields: Vec<String>,
    /// Document fetched by id after the search, if set.
    pub doc_id: Option<String>,
}

impl ProbeConfig {
    /// Read the probe settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROBE_INDEX`: Index to search (default: users)
    /// - `PROBE_QUERY`: Query string (default: juanse)
    /// - `PROBE_FIELDS`: Comma-separated fields (default: name)
    /// - `PROBE_DOC_ID`: Document id to fetch from the index (optional)
    pub fn from_env() -> Result<Self, ProbeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the probe settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProbeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let index = get("PROBE_INDEX").unwrap_or_else(|| DEFAULT_PROBE_INDEX.to_string());
        let query = get("PROBE_QUERY").unwrap_or_else(|| DEFAULT_PROBE_QUERY.to_string());
        let fields: Vec<String> = get("PROBE_FIELDS")
            .unwrap_or_else(|| DEFAULT_PROBE_FIELDS.to_string())
            .split(',')
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .collect();

        if fields.is_empty() {
            return Err(ProbeError::config("PROBE_FIELDS must name at least one field"));
        }

        Ok(Self {
            index,
            query,
            fields,
            doc_id: get("PROBE_DOC_ID"),
        })
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Document service; its client is built on first use.
    pub service: DocumentService,
    pub probe: ProbeConfig,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// No connection is made here. Client settings are read by
    /// [`ClientConfig::from_env`].
    pub fn new() -> Result<Self, ProbeError> {
        let client_config = ClientConfig::from_env();
        let probe = ProbeConfig::from_env()?;

        info!(
            mode = ?client_config.mode,
            endpoint = ?client_config.endpoint,
            region = %client_config.region,
            index = %probe.index,
            "Initializing dependencies"
        );

        Ok(Self {
            service: DocumentService::new(ClientProvider::new(client_config)),
            probe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.index, "users");
        assert_eq!(config.query, "juanse");
        assert_eq!(config.fields, vec!["name".to_string()]);
        assert_eq!(config.doc_id, None);
    }

    #[test]
    fn test_fields_are_split_and_trimmed() {
        let config = ProbeConfig::from_lookup(lookup(&[
            ("PROBE_INDEX", "people"),
            ("PROBE_FIELDS", "name, bio ,"),
            ("PROBE_DOC_ID", "4"),
        ]))
        .unwrap();

        assert_eq!(config.index, "people");
        assert_eq!(config.fields, vec!["name".to_string(), "bio".to_string()]);
        assert_eq!(config.doc_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_no_fields_is_error() {
        let result = ProbeConfig::from_lookup(lookup(&[("PROBE_FIELDS", " , ")]));
        assert!(matches!(result, Err(ProbeError::ConfigError(_))));
    }
}
