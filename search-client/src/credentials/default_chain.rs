//! Credentials from the AWS SDK default provider chain.
//!
//! The chain checks environment variables, shared config/credential files,
//! web identity tokens, ECS container credentials and EC2 instance metadata,
//! in that order.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use super::Credentials;
use crate::errors::SearchClientError;
use crate::interfaces::CredentialsProvider;

/// Resolves credentials through `aws-config`'s default chain.
///
/// The chain itself is loaded once, on first use; every call to
/// [`CredentialsProvider::provide_credentials`] asks it for the current
/// credentials.
#[derive(Debug, Default)]
pub struct DefaultChainCredentialsProvider {
    region: Option<String>,
    chain: OnceCell<SharedCredentialsProvider>,
}

impl DefaultChainCredentialsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the region used while loading the chain (relevant for STS).
    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            chain: OnceCell::new(),
        }
    }

    async fn chain(&self) -> Result<&SharedCredentialsProvider, SearchClientError> {
        self.chain
            .get_or_try_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(ref region) = self.region {
                    loader = loader.region(Region::new(region.clone()));
                }
                let sdk_config = loader.load().await;

                debug!(region = ?sdk_config.region(), "Loaded AWS default credential chain");

                sdk_config.credentials_provider().ok_or_else(|| {
                    SearchClientError::credentials("No AWS credentials provider is configured")
                })
            })
            .await
    }
}

#[async_trait]
impl CredentialsProvider for DefaultChainCredentialsProvider {
    async fn provide_credentials(&self) -> Result<Credentials, SearchClientError> {
        let resolved = self
            .chain()
            .await?
            .provide_credentials()
            .await
            .map_err(|e| SearchClientError::credentials(e.to_string()))?;

        Ok(Credentials::from(resolved))
    }
}

impl From<aws_credential_types::Credentials> for Credentials {
    fn from(resolved: aws_credential_types::Credentials) -> Self {
        let mut credentials =
            Credentials::new(resolved.access_key_id(), resolved.secret_access_key());
        if let Some(token) = resolved.session_token() {
            credentials = credentials.with_session_token(token);
        }
        if let Some(expiry) = resolved.expiry() {
            credentials = credentials.with_expiry(DateTime::<Utc>::from(expiry));
        }
        credentials
    }
}
