//! Request sender decorator that signs before forwarding.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::SignedConnection;
use crate::errors::SearchClientError;
use crate::interfaces::RequestSender;
use crate::types::{EngineRequest, EngineResponse};

/// The `host` header value for `endpoint`: the hostname, plus `:port` when
/// the port is not the scheme default.
pub fn host_header(endpoint: &Url) -> Result<String, SearchClientError> {
    let host = endpoint.host_str().ok_or_else(|| {
        SearchClientError::configuration(format!("Endpoint '{}' has no host", endpoint))
    })?;
    Ok(match endpoint.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Signs every request with a [`SignedConnection`], then hands it to the
/// wrapped sender.
pub struct SigningSender {
    connection: SignedConnection,
    inner: Arc<dyn RequestSender>,
    host: String,
    path_prefix: String,
}

impl SigningSender {
    /// Wrap `inner`, signing for requests addressed to `endpoint`.
    pub fn new(
        connection: SignedConnection,
        inner: Arc<dyn RequestSender>,
        endpoint: &Url,
    ) -> Result<Self, SearchClientError> {
        Ok(Self {
            connection,
            inner,
            host: host_header(endpoint)?,
            path_prefix: endpoint.path().trim_end_matches('/').to_string(),
        })
    }

    pub fn connection(&self) -> &SignedConnection {
        &self.connection
    }
}

#[async_trait]
impl RequestSender for SigningSender {
    async fn send(&self, mut request: EngineRequest) -> Result<EngineResponse, SearchClientError> {
        // The transport resolves paths against the endpoint, so an endpoint
        // path prefix is part of what the engine sees and must be signed.
        let mut signable = request.clone();
        signable.path = format!("{}{}", self.path_prefix, request.path);

        let signed = self.connection.sign_request(signable, &self.host).await?;
        request.headers = signed.headers;

        debug!(
            method = %request.method,
            path = %request.path,
            host = %self.host,
            "Signed request"
        );

        self.inner.send(request).await
    }
}

impl std::fmt::Debug for SigningSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSender")
            .field("host", &self.host)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}
