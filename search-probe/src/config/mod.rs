//! Configuration and dependency initialization for the probe.

mod dependencies;

pub use dependencies::{Dependencies, ProbeConfig};
