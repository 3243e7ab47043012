//! Fixed credentials.

use async_trait::async_trait;

use super::Credentials;
use crate::errors::SearchClientError;
use crate::interfaces::CredentialsProvider;

/// Always returns the credentials it was built with.
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    credentials: Credentials,
}

impl StaticCredentialsProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn provide_credentials(&self) -> Result<Credentials, SearchClientError> {
        Ok(self.credentials.clone())
    }
}
