//! Lazy client provisioning.
//!
//! A [`ClientProvider`] builds its [`SearchClient`] on first use and hands
//! out the same handle afterwards. Construction goes through an async
//! once-cell, so concurrent first callers wait for a single build instead of
//! racing to create several.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::SearchClient;
use crate::config::ClientConfig;
use crate::errors::SearchClientError;
use crate::interfaces::{CredentialsProvider, RequestSender};

/// Builds and memoizes one [`SearchClient`].
pub struct ClientProvider {
    config: ClientConfig,
    credentials: Arc<dyn CredentialsProvider>,
    base_sender: Option<Arc<dyn RequestSender>>,
    client: OnceCell<Arc<SearchClient>>,
}

impl ClientProvider {
    /// Create a provider that builds its client from `config` on first use.
    ///
    /// Nothing is validated here; configuration errors surface from the
    /// first [`ClientProvider::get_client`] call.
    pub fn new(config: ClientConfig) -> Self {
        let credentials = config.credentials_source.provider(&config.region);
        Self {
            config,
            credentials,
            base_sender: None,
            client: OnceCell::new(),
        }
    }

    /// Create a provider configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Create a provider around an already-built client.
    ///
    /// The client is returned unchanged by every call; no configuration is
    /// consulted.
    pub fn with_client(client: impl Into<Arc<SearchClient>>) -> Self {
        let config = ClientConfig::default();
        Self {
            credentials: config.credentials_source.provider(&config.region),
            config,
            base_sender: None,
            client: OnceCell::from(client.into()),
        }
    }

    /// Replace the credentials provider used in remote mode.
    pub fn with_credentials_provider(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Send through `sender` instead of a new HTTP transport.
    pub fn with_base_sender(mut self, sender: Arc<dyn RequestSender>) -> Self {
        self.base_sender = Some(sender);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Return the client, building it on first use.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<SearchClient>)` - The memoized client
    /// * `Err(SearchClientError)` - If building fails; nothing is memoized
    ///   and the next call tries again
    pub async fn get_client(&self) -> Result<Arc<SearchClient>, SearchClientError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                debug!(mode = ?self.config.mode, "Building search client on first use");
                let client = SearchClient::from_config_with(
                    &self.config,
                    self.credentials.clone(),
                    self.base_sender.clone(),
                )
                .await?;
                Ok::<_, SearchClientError>(Arc::new(client))
            })
            .await?;

        Ok(Arc::clone(client))
    }

    /// The client if it has been built or injected, without building it.
    pub fn current_client(&self) -> Option<Arc<SearchClient>> {
        self.client.get().cloned()
    }
}

impl std::fmt::Debug for ClientProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientProvider")
            .field("config", &self.config)
            .field("client", &self.client.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientMode;

    #[tokio::test]
    async fn test_get_client_memoizes() {
        let provider = ClientProvider::new(ClientConfig::local());

        let first = provider.get_client().await.unwrap();
        let second = provider.get_client().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_current_client_before_and_after_build() {
        let provider = ClientProvider::new(ClientConfig::local());
        assert!(provider.current_client().is_none());

        let client = provider.get_client().await.unwrap();
        assert!(Arc::ptr_eq(&client, &provider.current_client().unwrap()));
    }

    #[tokio::test]
    async fn test_missing_remote_endpoint_surfaces_on_first_use() {
        let config = ClientConfig {
            mode: ClientMode::Remote,
            ..ClientConfig::local()
        };
        let provider = ClientProvider::new(config);

        let result = provider.get_client().await;
        assert!(matches!(
            result,
            Err(SearchClientError::ConfigurationError(_))
        ));
        assert!(provider.current_client().is_none());
    }
}
