//! Credentials provider trait definition.

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::errors::SearchClientError;

/// Resolves the identity used to sign requests.
///
/// Resolution may perform network I/O (instance metadata, STS, SSO). No
/// retry happens at this layer; failures are returned as
/// [`SearchClientError::CredentialResolutionError`].
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Fetch the current credentials.
    async fn provide_credentials(&self) -> Result<Credentials, SearchClientError>;
}
