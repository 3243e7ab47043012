//! Search Probe Entry Point
//!
//! Loads `.env`, connects to the configured cluster and runs a sample
//! search, logging what it finds.

use dotenv::dotenv;
use search_probe::{run, Dependencies, ProbeError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), ProbeError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_probe=info,search_client=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| ProbeError::tracing(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| ProbeError::tracing(e.to_string()))?;
    }

    info!(
        service_name = "search-probe",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ProbeError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting search probe");

    let deps = match Dependencies::new() {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match run(&deps.service, &deps.probe).await {
        Ok(report) => {
            info!(
                cluster_name = %report.cluster_name,
                version = %report.version,
                hits = report.hits.len(),
                "Probe completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Probe failed");
            Err(e)
        }
    }
}
