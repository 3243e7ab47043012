//! # Search Probe
//!
//! Connectivity probe for the search client. It provisions a client from
//! the environment, prints the cluster identity and runs a sample
//! `simple_query_string` search.
//!
//! ## Modules
//!
//! - [`config`]: Probe settings and dependency initialization
//! - [`runner`]: The probe run itself
//! - [`errors`]: Error types for the probe

pub mod config;
pub mod errors;
pub mod runner;

pub use config::{Dependencies, ProbeConfig};
pub use errors::ProbeError;
pub use runner::{run, ProbeReport};
