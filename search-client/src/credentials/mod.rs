//! Credentials for signing requests to a managed search service.
//!
//! This module provides the credential value type, the built-in providers,
//! and the cache that applies the configured refresh policy.

mod cache;
#[cfg(feature = "aws-auth")]
mod default_chain;
mod environment;
mod static_provider;

use std::fmt;

use chrono::{DateTime, Duration, Utc};

pub use cache::{CredentialCache, CredentialRefresh};
#[cfg(feature = "aws-auth")]
pub use default_chain::DefaultChainCredentialsProvider;
pub use environment::EnvironmentCredentialsProvider;
pub use static_provider::StaticCredentialsProvider;

/// A time-bounded access key / secret / session token triple.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Create long-lived credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            expires_at: None,
        }
    }

    /// Attach a session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Attach an expiry instant.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the credentials expire within `skew` of `now`.
    ///
    /// Credentials without an expiry never expire.
    pub fn expires_within(&self, skew: Duration, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            // A skew reaching past the earliest representable instant covers
            // every expiry.
            Some(expires_at) => expires_at
                .checked_sub_signed(skew)
                .map_or(true, |refresh_at| refresh_at <= now),
            None => false,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
