//! AWS Signature Version 4.

use std::time::SystemTime;

use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use chrono::{DateTime, Utc};

use crate::credentials::Credentials;
use crate::errors::SearchClientError;
use crate::types::EngineRequest;

pub const AUTHORIZATION: &str = "authorization";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

const PROVIDER_NAME: &str = "search-client";

/// Signs requests for one region and service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigV4Signer {
    region: String,
    service: String,
}

impl SigV4Signer {
    /// Create a signer for `service` (e.g. `es`) in `region` (e.g. `us-east-1`).
    pub fn new(region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Sign `request` at instant `at`.
    ///
    /// Every header present on the request is signed, including `host`,
    /// which must already be set. The returned request carries
    /// `x-amz-date`, `x-amz-security-token` when the credentials have a
    /// session token, and `authorization`.
    ///
    /// # Returns
    ///
    /// * `Ok(EngineRequest)` - The signed request
    /// * `Err(SearchClientError::SigningError)` - If the path is not absolute,
    ///   `host` is missing, or the credentials have no access key
    pub fn sign(
        &self,
        mut request: EngineRequest,
        credentials: &Credentials,
        at: DateTime<Utc>,
    ) -> Result<EngineRequest, SearchClientError> {
        if !request.path.starts_with('/') {
            return Err(SearchClientError::signing(format!(
                "Request path must be absolute, got '{}'",
                request.path
            )));
        }
        let host = match request.header_value("host") {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(SearchClientError::signing("Request has no host header")),
        };
        if credentials.access_key_id().is_empty() {
            return Err(SearchClientError::signing("Credentials have no access key id"));
        }

        request.headers.remove(AUTHORIZATION);
        request.headers.remove(X_AMZ_DATE);
        request.headers.remove(X_AMZ_SECURITY_TOKEN);

        let identity = aws_credential_types::Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token().map(str::to_string),
            None,
            PROVIDER_NAME,
        )
        .into();
        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(&self.service)
            .time(SystemTime::from(at))
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| SearchClientError::signing(e.to_string()))?
            .into();

        let signed_headers = {
            let uri = format!("https://{}{}", host, request.path_and_query());
            let signable = SignableRequest::new(
                request.method.as_str(),
                uri,
                request
                    .headers
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
                SignableBody::Bytes(request.body.as_deref().unwrap_or_default()),
            )
            .map_err(|e| SearchClientError::signing(e.to_string()))?;

            let (instructions, _signature) = sign(signable, &params)
                .map_err(|e| SearchClientError::signing(e.to_string()))?
                .into_parts();
            let (headers, _query) = instructions.into_parts();
            headers
                .iter()
                .map(|header| (header.name().to_ascii_lowercase(), header.value().to_string()))
                .collect::<Vec<_>>()
        };

        request.headers.extend(signed_headers);
        Ok(request)
    }
}
