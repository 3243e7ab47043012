//! Configuration types for the search client.
//!
//! A [`ClientConfig`] is an explicit value: build it in code, or read it
//! from the environment once at start-up with [`ClientConfig::from_env`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tracing::warn;

use crate::credentials::{CredentialRefresh, EnvironmentCredentialsProvider};
use crate::interfaces::CredentialsProvider;

/// Endpoint used in local mode when none is configured.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:9200";

/// Default signing region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default signing service name for AWS OpenSearch Service.
pub const DEFAULT_SIGNING_SERVICE: &str = "es";

/// Default transport request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default credential refresh skew in seconds.
const DEFAULT_REFRESH_SKEW_SECS: i64 = 300;

/// Where the client sends requests and whether it signs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    /// Local cluster: plain requests, optional basic auth.
    Local,
    /// Managed service: every request is SigV4-signed.
    Remote,
}

impl ClientMode {
    /// Parse the `APP_ENV` value.
    ///
    /// `development` and `local` (case-insensitive) select local mode;
    /// anything else, including an unset variable, selects remote mode.
    pub fn from_app_env(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("development") | Some("local") => Self::Local,
            _ => Self::Remote,
        }
    }
}

/// Where signing credentials come from in remote mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsSource {
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN`.
    Environment,
    /// The AWS SDK default provider chain.
    #[cfg(feature = "aws-auth")]
    DefaultChain,
}

impl Default for CredentialsSource {
    #[cfg(feature = "aws-auth")]
    fn default() -> Self {
        Self::DefaultChain
    }

    #[cfg(not(feature = "aws-auth"))]
    fn default() -> Self {
        Self::Environment
    }
}

impl CredentialsSource {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "environment" | "env" => Some(Self::Environment),
            #[cfg(feature = "aws-auth")]
            "default-chain" | "default_chain" | "default" => Some(Self::DefaultChain),
            _ => None,
        }
    }

    /// Build the provider for this source.
    pub fn provider(&self, region: &str) -> Arc<dyn CredentialsProvider> {
        match self {
            Self::Environment => Arc::new(EnvironmentCredentialsProvider::new()),
            #[cfg(feature = "aws-auth")]
            Self::DefaultChain => Arc::new(
                crate::credentials::DefaultChainCredentialsProvider::with_region(region),
            ),
        }
    }
}

/// Basic authentication for local clusters.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"** redacted **")
            .finish()
    }
}

/// Configuration for building a [`crate::SearchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Local (unsigned) or remote (signed).
    pub mode: ClientMode,

    /// Endpoint URL. Optional in local mode, required in remote mode.
    pub endpoint: Option<String>,

    /// Basic auth, only applied in local mode.
    pub basic_auth: Option<BasicAuth>,

    /// Signing region.
    pub region: String,

    /// Signing service name.
    pub service: String,

    /// Source of signing credentials.
    pub credentials_source: CredentialsSource,

    /// When signing credentials are fetched again.
    pub credential_refresh: CredentialRefresh,

    /// Transport request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::local()
    }
}

impl ClientConfig {
    /// Local mode against the default endpoint.
    pub fn local() -> Self {
        Self {
            mode: ClientMode::Local,
            endpoint: None,
            basic_auth: None,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SIGNING_SERVICE.to_string(),
            credentials_source: CredentialsSource::default(),
            credential_refresh: CredentialRefresh::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Remote mode against `endpoint`.
    pub fn remote(endpoint: impl Into<String>) -> Self {
        Self {
            mode: ClientMode::Remote,
            endpoint: Some(endpoint.into()),
            ..Self::local()
        }
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set basic authentication credentials.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Set the signing region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the signing service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Set the credentials source.
    pub fn with_credentials_source(mut self, source: CredentialsSource) -> Self {
        self.credentials_source = source;
        self
    }

    /// Set the credential refresh policy.
    pub fn with_credential_refresh(mut self, refresh: CredentialRefresh) -> Self {
        self.credential_refresh = refresh;
        self
    }

    /// Set the transport request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `APP_ENV`: `development`/`local` for local mode, anything else for remote (default: remote)
    /// - `OPENSEARCH_HOST`: Endpoint URL (local default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: Basic auth for local mode
    /// - `AWS_REGION`: Signing region (default: us-east-1)
    /// - `OPENSEARCH_SIGNING_SERVICE`: Signing service name (default: es)
    /// - `OPENSEARCH_CREDENTIALS_SOURCE`: `default-chain` or `environment`
    /// - `OPENSEARCH_CREDENTIAL_REFRESH`: `once` or `before-expiry` (default: before-expiry)
    /// - `OPENSEARCH_CREDENTIAL_REFRESH_SKEW_SECS`: Refresh skew (default: 300)
    /// - `OPENSEARCH_REQUEST_TIMEOUT_SECS`: Request timeout (default: 30)
    ///
    /// A missing remote endpoint is not an error here; it is reported when
    /// the client is first built.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = ClientMode::from_app_env(get("APP_ENV").as_deref());

        let basic_auth = match (get("OPENSEARCH_USERNAME"), get("OPENSEARCH_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicAuth { username, password }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("Only one of OPENSEARCH_USERNAME/OPENSEARCH_PASSWORD is set, ignoring basic auth");
                None
            }
            (None, None) => None,
        };

        let credentials_source = match get("OPENSEARCH_CREDENTIALS_SOURCE") {
            Some(value) => CredentialsSource::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid OPENSEARCH_CREDENTIALS_SOURCE, using default");
                CredentialsSource::default()
            }),
            None => CredentialsSource::default(),
        };

        let skew = refresh_skew(get("OPENSEARCH_CREDENTIAL_REFRESH_SKEW_SECS"));
        let credential_refresh = match get("OPENSEARCH_CREDENTIAL_REFRESH")
            .unwrap_or_else(|| "before-expiry".to_string())
            .to_lowercase()
            .as_str()
        {
            "once" => CredentialRefresh::Once,
            "before-expiry" | "before_expiry" => CredentialRefresh::BeforeExpiry(skew),
            _ => {
                warn!("Invalid OPENSEARCH_CREDENTIAL_REFRESH, defaulting to 'before-expiry'");
                CredentialRefresh::BeforeExpiry(skew)
            }
        };

        let request_timeout = get("OPENSEARCH_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            mode,
            endpoint: get("OPENSEARCH_HOST"),
            basic_auth,
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            service: get("OPENSEARCH_SIGNING_SERVICE")
                .unwrap_or_else(|| DEFAULT_SIGNING_SERVICE.to_string()),
            credentials_source,
            credential_refresh,
            request_timeout: Duration::from_secs(request_timeout),
        }
    }

    /// The endpoint to use in local mode.
    pub fn local_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_LOCAL_ENDPOINT)
    }
}

/// Parse the refresh skew in seconds, falling back to the default for
/// anything that is not a representable, non-negative duration.
fn refresh_skew(value: Option<String>) -> TimeDelta {
    let default = TimeDelta::seconds(DEFAULT_REFRESH_SKEW_SECS);
    let Some(value) = value else {
        return default;
    };

    match value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs >= 0)
        .and_then(TimeDelta::try_seconds)
    {
        Some(skew) => skew,
        None => {
            warn!(
                value = %value,
                "Invalid OPENSEARCH_CREDENTIAL_REFRESH_SKEW_SECS, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_app_env_selects_mode() {
        assert_eq!(ClientMode::from_app_env(Some("development")), ClientMode::Local);
        assert_eq!(ClientMode::from_app_env(Some("LOCAL")), ClientMode::Local);
        assert_eq!(ClientMode::from_app_env(Some("production")), ClientMode::Remote);
        assert_eq!(ClientMode::from_app_env(None), ClientMode::Remote);
    }

    #[test]
    fn test_empty_environment_defaults() {
        let config = config(&[]);

        assert_eq!(config.mode, ClientMode::Remote);
        assert!(config.endpoint.is_none());
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.service, DEFAULT_SIGNING_SERVICE);
        assert_eq!(config.credentials_source, CredentialsSource::default());
        assert_eq!(
            config.credential_refresh,
            CredentialRefresh::BeforeExpiry(TimeDelta::seconds(300))
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_local_endpoint_defaults_to_localhost() {
        let config = config(&[("APP_ENV", "development")]);

        assert_eq!(config.mode, ClientMode::Local);
        assert_eq!(config.local_endpoint(), "http://localhost:9200");
    }

    #[test]
    fn test_full_environment() {
        let config = config(&[
            ("APP_ENV", "production"),
            ("OPENSEARCH_HOST", "https://example.org"),
            ("AWS_REGION", "eu-west-1"),
            ("OPENSEARCH_SIGNING_SERVICE", "aoss"),
            ("OPENSEARCH_CREDENTIALS_SOURCE", "environment"),
            ("OPENSEARCH_CREDENTIAL_REFRESH", "once"),
            ("OPENSEARCH_REQUEST_TIMEOUT_SECS", "5"),
        ]);

        assert_eq!(config.mode, ClientMode::Remote);
        assert_eq!(config.endpoint.as_deref(), Some("https://example.org"));
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.service, "aoss");
        assert_eq!(config.credentials_source, CredentialsSource::Environment);
        assert_eq!(config.credential_refresh, CredentialRefresh::Once);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_basic_auth_requires_both_values() {
        let config_both = config(&[
            ("OPENSEARCH_USERNAME", "admin"),
            ("OPENSEARCH_PASSWORD", "admin"),
        ]);
        assert_eq!(
            config_both.basic_auth.map(|a| a.username),
            Some("admin".to_string())
        );

        let config_one = config(&[("OPENSEARCH_USERNAME", "admin")]);
        assert!(config_one.basic_auth.is_none());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[
            ("OPENSEARCH_CREDENTIAL_REFRESH", "sometimes"),
            ("OPENSEARCH_CREDENTIAL_REFRESH_SKEW_SECS", "60"),
            ("OPENSEARCH_CREDENTIALS_SOURCE", "magic"),
            ("OPENSEARCH_REQUEST_TIMEOUT_SECS", "soon"),
        ]);

        assert_eq!(
            config.credential_refresh,
            CredentialRefresh::BeforeExpiry(TimeDelta::seconds(60))
        );
        assert_eq!(config.credentials_source, CredentialsSource::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_out_of_range_skew_falls_back() {
        for value in ["9223372036854775807", "-60", "1e3"] {
            let config = config(&[("OPENSEARCH_CREDENTIAL_REFRESH_SKEW_SECS", value)]);

            assert_eq!(
                config.credential_refresh,
                CredentialRefresh::BeforeExpiry(TimeDelta::seconds(300)),
                "skew {}",
                value
            );
        }
    }

    #[test]
    fn test_basic_auth_debug_redacts_password() {
        let config = ClientConfig::local().with_basic_auth("admin", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
