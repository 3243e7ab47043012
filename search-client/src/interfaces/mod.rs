//! Interfaces for the search client.
//!
//! This module defines the seams where request transport and credential
//! resolution are injected.

pub mod credentials_provider;
pub mod request_sender;

pub use credentials_provider::CredentialsProvider;
pub use request_sender::RequestSender;
