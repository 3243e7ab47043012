//! Request sender backed by the `opensearch` crate's transport.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::auth::Credentials as TransportCredentials;
use opensearch::http::headers::{HeaderMap, HeaderName, HeaderValue};
use opensearch::http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder};
use opensearch::http::Method as TransportMethod;
use tracing::{debug, info};
use url::Url;

use crate::config::BasicAuth;
use crate::errors::SearchClientError;
use crate::interfaces::RequestSender;
use crate::types::{EngineRequest, EngineResponse, Method};

/// Sends requests over a single-node `opensearch` transport.
///
/// Connection pooling, TLS and timeouts are the transport's; this type only
/// maps [`EngineRequest`] onto `Transport::send` and reads the response back.
///
/// # Example
///
/// ```ignore
/// let endpoint = Url::parse("http://localhost:9200")?;
/// let sender = HttpSender::new(endpoint, None, Duration::from_secs(30))?;
/// let response = sender.send(EngineRequest::new(Method::Get, "/")).await?;
/// ```
#[derive(Clone)]
pub struct HttpSender {
    transport: Transport,
    endpoint: Url,
}

impl HttpSender {
    /// Create a sender for `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The engine URL (e.g., "http://localhost:9200")
    /// * `basic_auth` - Optional username/password attached to every request
    /// * `request_timeout` - Per-request timeout applied by the transport
    ///
    /// # Returns
    ///
    /// * `Ok(HttpSender)` - A new sender
    /// * `Err(SearchClientError)` - If the transport cannot be built
    pub fn new(
        endpoint: Url,
        basic_auth: Option<&BasicAuth>,
        request_timeout: Duration,
    ) -> Result<Self, SearchClientError> {
        let conn_pool = SingleNodeConnectionPool::new(endpoint.clone());
        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(request_timeout)
            .disable_proxy();

        if let Some(auth) = basic_auth {
            builder = builder.auth(TransportCredentials::Basic(
                auth.username.clone(),
                auth.password.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| SearchClientError::connection(e.to_string()))?;

        info!(
            url = %endpoint,
            basic_auth = basic_auth.is_some(),
            timeout_secs = request_timeout.as_secs(),
            "Created OpenSearch transport"
        );

        Ok(Self {
            transport,
            endpoint,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport_method(method: Method) -> TransportMethod {
        match method {
            Method::Get => TransportMethod::Get,
            Method::Put => TransportMethod::Put,
            Method::Post => TransportMethod::Post,
            Method::Delete => TransportMethod::Delete,
            Method::Head => TransportMethod::Head,
        }
    }

    fn header_map(request: &EngineRequest) -> Result<HeaderMap, SearchClientError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SearchClientError::transport(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                SearchClientError::transport(format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl RequestSender for HttpSender {
    async fn send(&self, request: EngineRequest) -> Result<EngineResponse, SearchClientError> {
        let headers = Self::header_map(&request)?;
        // The query is already encoded into the path so the bytes on the wire
        // match what was signed.
        let path_and_query = request.path_and_query();

        let response = self
            .transport
            .send(
                Self::transport_method(request.method),
                &path_and_query,
                headers,
                None::<&()>,
                request.body,
                None,
            )
            .await?;

        let status = response.status_code().as_u16();
        let body = response.text().await?;

        debug!(
            method = %request.method,
            path = %path_and_query,
            status = status,
            "Received engine response"
        );

        Ok(EngineResponse::new(status, body))
    }
}

impl std::fmt::Debug for HttpSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSender")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}
