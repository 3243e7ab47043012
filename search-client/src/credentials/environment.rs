//! Credentials from environment variables.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;

use super::Credentials;
use crate::errors::SearchClientError;
use crate::interfaces::CredentialsProvider;

const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
const SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
/// `AWS_SESSION_TOKEN` each time credentials are requested.
#[derive(Clone)]
pub struct EnvironmentCredentialsProvider {
    lookup: Lookup,
}

impl EnvironmentCredentialsProvider {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|key| env::var(key).ok())
    }

    /// Read through a custom lookup function.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    fn required(&self, key: &str) -> Result<String, SearchClientError> {
        (self.lookup)(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| SearchClientError::credentials(format!("{} is not set", key)))
    }
}

impl Default for EnvironmentCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvironmentCredentialsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentCredentialsProvider").finish()
    }
}

#[async_trait]
impl CredentialsProvider for EnvironmentCredentialsProvider {
    async fn provide_credentials(&self) -> Result<Credentials, SearchClientError> {
        let access_key_id = self.required(ACCESS_KEY_ID)?;
        let secret_access_key = self.required(SECRET_ACCESS_KEY)?;

        let mut credentials = Credentials::new(access_key_id, secret_access_key);
        if let Some(token) = (self.lookup)(SESSION_TOKEN).filter(|t| !t.is_empty()) {
            credentials = credentials.with_session_token(token);
        }

        Ok(credentials)
    }
}
