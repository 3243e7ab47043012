//! Signed connections.
//!
//! [`build_signed_connection`] resolves credentials and returns a
//! [`SignedConnection`] that turns plain request descriptors into signed
//! ones. [`SigningSender`] composes such a connection with any
//! [`crate::RequestSender`], signing each request before forwarding it.

mod signed_connection;
mod signing_sender;

pub use signed_connection::{build_signed_connection, SignedConnection};
pub use signing_sender::{host_header, SigningSender};
