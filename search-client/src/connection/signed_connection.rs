//! Credential-backed request signing.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::credentials::{CredentialCache, CredentialRefresh};
use crate::errors::SearchClientError;
use crate::interfaces::CredentialsProvider;
use crate::signing::SigV4Signer;
use crate::types::EngineRequest;

/// Signs request descriptors with cached credentials for a fixed region and
/// service.
#[derive(Debug)]
pub struct SignedConnection {
    signer: SigV4Signer,
    credentials: CredentialCache,
}

/// Resolve credentials and build a [`SignedConnection`].
///
/// Credentials are fetched exactly once here; later fetches happen only if
/// `refresh` calls for them.
///
/// # Arguments
///
/// * `region` - The signing region (e.g., "us-east-1")
/// * `service` - The signing service name (e.g., "es")
/// * `provider` - Where credentials come from
/// * `refresh` - When cached credentials are fetched again
///
/// # Returns
///
/// * `Ok(SignedConnection)` - Ready to sign requests
/// * `Err(SearchClientError::CredentialResolutionError)` - If no identity can be resolved
pub async fn build_signed_connection(
    region: &str,
    service: &str,
    provider: Arc<dyn CredentialsProvider>,
    refresh: CredentialRefresh,
) -> Result<SignedConnection, SearchClientError> {
    let credentials = CredentialCache::fetch(provider, refresh).await?;

    info!(region = %region, service = %service, "Built signed connection");

    Ok(SignedConnection {
        signer: SigV4Signer::new(region, service),
        credentials,
    })
}

impl SignedConnection {
    /// Sign `request`, defaulting its `host` header to `hostname`.
    ///
    /// An existing `host` header is kept as is.
    pub async fn sign_request(
        &self,
        mut request: EngineRequest,
        hostname: &str,
    ) -> Result<EngineRequest, SearchClientError> {
        request
            .headers
            .entry("host".to_string())
            .or_insert_with(|| hostname.to_string());

        let credentials = self.credentials.credentials().await?;
        self.signer.sign(request, &credentials, Utc::now())
    }

    pub fn signer(&self) -> &SigV4Signer {
        &self.signer
    }

    pub fn refresh_policy(&self) -> CredentialRefresh {
        self.credentials.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credentials, StaticCredentialsProvider};
    use crate::signing::{AUTHORIZATION, X_AMZ_DATE};
    use crate::types::Method;

    async fn connection() -> SignedConnection {
        let provider = Arc::new(StaticCredentialsProvider::new(Credentials::new(
            "AKID", "secret",
        )));
        build_signed_connection("us-east-1", "es", provider, CredentialRefresh::Once)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_request_defaults_host() {
        let connection = connection().await;

        let signed = connection
            .sign_request(EngineRequest::new(Method::Get, "/"), "example.org")
            .await
            .unwrap();

        assert_eq!(signed.header_value("host"), Some("example.org"));
        assert!(signed.header_value(X_AMZ_DATE).is_some());
        assert!(signed
            .header_value(AUTHORIZATION)
            .unwrap()
            .starts_with("AWS4-HMAC-SHA256 Credential=AKID/"));
    }

    #[tokio::test]
    async fn test_sign_request_keeps_existing_host() {
        let connection = connection().await;
        let request = EngineRequest::new(Method::Get, "/").header("Host", "proxy.internal");

        let signed = connection.sign_request(request, "example.org").await.unwrap();

        assert_eq!(signed.header_value("host"), Some("proxy.internal"));
    }

    #[tokio::test]
    async fn test_sign_request_empty_hostname_fails() {
        let connection = connection().await;

        let result = connection
            .sign_request(EngineRequest::new(Method::Get, "/"), "")
            .await;
        assert!(matches!(result, Err(SearchClientError::SigningError(_))));
    }

    #[tokio::test]
    async fn test_connection_reports_signer() {
        let connection = connection().await;

        assert_eq!(connection.signer().region(), "us-east-1");
        assert_eq!(connection.signer().service(), "es");
        assert_eq!(connection.refresh_policy(), CredentialRefresh::Once);
    }
}
