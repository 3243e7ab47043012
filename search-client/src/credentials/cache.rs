//! Credential caching with an explicit refresh policy.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::Credentials;
use crate::errors::SearchClientError;
use crate::interfaces::CredentialsProvider;

/// When cached credentials are fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialRefresh {
    /// Fetch once when the connection is built and never again.
    ///
    /// A long-lived client keeps signing with the same credentials after
    /// they expire; use this only for short-lived clients or credentials
    /// without an expiry.
    Once,
    /// Fetch again when the cached credentials expire within the given skew.
    BeforeExpiry(Duration),
}

impl Default for CredentialRefresh {
    fn default() -> Self {
        Self::BeforeExpiry(Duration::minutes(5))
    }
}

/// Holds the credentials of one connection and re-fetches them according to
/// its [`CredentialRefresh`] policy.
pub struct CredentialCache {
    provider: Arc<dyn CredentialsProvider>,
    policy: CredentialRefresh,
    current: RwLock<Credentials>,
}

impl CredentialCache {
    /// Fetch the initial credentials and build the cache.
    ///
    /// # Returns
    ///
    /// * `Ok(CredentialCache)` - Holding freshly fetched credentials
    /// * `Err(SearchClientError)` - If the provider cannot resolve an identity
    pub async fn fetch(
        provider: Arc<dyn CredentialsProvider>,
        policy: CredentialRefresh,
    ) -> Result<Self, SearchClientError> {
        let credentials = provider.provide_credentials().await?;

        info!(
            access_key_id = %credentials.access_key_id(),
            expires_at = ?credentials.expires_at(),
            policy = ?policy,
            "Resolved signing credentials"
        );

        Ok(Self {
            provider,
            policy,
            current: RwLock::new(credentials),
        })
    }

    /// The refresh policy in effect.
    pub fn policy(&self) -> CredentialRefresh {
        self.policy
    }

    /// Credentials valid at `now`, re-fetching first if the policy asks for it.
    pub async fn credentials_at(&self, now: DateTime<Utc>) -> Result<Credentials, SearchClientError> {
        let skew = match self.policy {
            CredentialRefresh::Once => return Ok(self.current.read().await.clone()),
            CredentialRefresh::BeforeExpiry(skew) => skew,
        };

        {
            let current = self.current.read().await;
            if !current.expires_within(skew, now) {
                return Ok(current.clone());
            }
        }

        let mut current = self.current.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if current.expires_within(skew, now) {
            debug!(expires_at = ?current.expires_at(), "Refreshing signing credentials");
            *current = self.provider.provide_credentials().await?;
        }
        Ok(current.clone())
    }

    /// Credentials valid now.
    pub async fn credentials(&self) -> Result<Credentials, SearchClientError> {
        self.credentials_at(Utc::now()).await
    }
}

impl std::fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCache")
            .field("policy", &self.policy)
            .finish()
    }
}
