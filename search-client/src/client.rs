//! The search client handle.
//!
//! A [`SearchClient`] owns the request sender for one endpoint: a plain
//! transport in local mode, or the same transport wrapped in a
//! [`SigningSender`] in remote mode.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::config::{ClientConfig, ClientMode};
use crate::connection::{build_signed_connection, SigningSender};
use crate::errors::SearchClientError;
use crate::interfaces::{CredentialsProvider, RequestSender};
use crate::opensearch::HttpSender;
use crate::types::{EngineRequest, EngineResponse};

/// Handle to a configured search engine endpoint.
///
/// # Example
///
/// ```no_run
/// use search_client::{ClientConfig, SearchClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SearchClient::from_config(&ClientConfig::remote("https://example.org")).await?;
/// assert_eq!(client.endpoint().as_str(), "https://example.org/");
/// # Ok(())
/// # }
/// ```
pub struct SearchClient {
    sender: Arc<dyn RequestSender>,
    endpoint: Url,
    mode: ClientMode,
}

impl SearchClient {
    /// Wrap an existing sender.
    pub fn new(sender: Arc<dyn RequestSender>, endpoint: Url, mode: ClientMode) -> Self {
        Self {
            sender,
            endpoint,
            mode,
        }
    }

    /// Build a client from configuration, taking credentials from
    /// `config.credentials_source`.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchClient)` - A client ready to send requests
    /// * `Err(SearchClientError::ConfigurationError)` - If the endpoint is missing or invalid
    /// * `Err(SearchClientError::CredentialResolutionError)` - If remote credentials cannot be resolved
    pub async fn from_config(config: &ClientConfig) -> Result<Self, SearchClientError> {
        let credentials = config.credentials_source.provider(&config.region);
        Self::from_config_with(config, credentials, None).await
    }

    /// Build a client from configuration with an explicit credentials
    /// provider and, optionally, the plain sender to send through.
    ///
    /// When `base` is `None` an [`HttpSender`] is created for the endpoint.
    /// In remote mode the endpoint is validated before any credential fetch.
    pub async fn from_config_with(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialsProvider>,
        base: Option<Arc<dyn RequestSender>>,
    ) -> Result<Self, SearchClientError> {
        match config.mode {
            ClientMode::Local => {
                let endpoint = parse_endpoint(config.local_endpoint())?;
                let sender = match base {
                    Some(sender) => sender,
                    None => Arc::new(HttpSender::new(
                        endpoint.clone(),
                        config.basic_auth.as_ref(),
                        config.request_timeout,
                    )?),
                };

                info!(endpoint = %endpoint, "Created local search client");
                Ok(Self::new(sender, endpoint, ClientMode::Local))
            }
            ClientMode::Remote => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    SearchClientError::configuration(
                        "OPENSEARCH_HOST must be set when running in remote mode",
                    )
                })?;
                let endpoint = parse_endpoint(endpoint)?;
                let sender = match base {
                    Some(sender) => sender,
                    None => Arc::new(HttpSender::new(
                        endpoint.clone(),
                        None,
                        config.request_timeout,
                    )?),
                };

                let connection = build_signed_connection(
                    &config.region,
                    &config.service,
                    credentials,
                    config.credential_refresh,
                )
                .await?;
                let signing = SigningSender::new(connection, sender, &endpoint)?;

                info!(
                    endpoint = %endpoint,
                    region = %config.region,
                    service = %config.service,
                    "Created signed search client"
                );
                Ok(Self::new(Arc::new(signing), endpoint, ClientMode::Remote))
            }
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    /// Whether requests are signed.
    pub fn is_signed(&self) -> bool {
        self.mode == ClientMode::Remote
    }

    /// Send a request and return the engine's response unchanged.
    pub async fn send(&self, request: EngineRequest) -> Result<EngineResponse, SearchClientError> {
        debug!(method = %request.method, path = %request.path, "Sending search request");
        self.sender.send(request).await
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("mode", &self.mode)
            .finish()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, SearchClientError> {
    Url::parse(endpoint).map_err(|e| {
        SearchClientError::configuration(format!("Invalid endpoint '{}': {}", endpoint, e))
    })
}
