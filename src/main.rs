//! Voxtrack delivery lookup service.
//!
//! Main entry point. Initializes logging, loads configuration, constructs
//! the content-store lookup client, and serves the webhook API until a
//! shutdown signal arrives.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use voxtrack_api::{server, AppState, Config};
use voxtrack_lookup::LookupClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("starting voxtrack delivery lookup service");

    let config = Config::load()?;
    if config.store_api_token.is_empty() {
        // Startup continues; every lookup will degrade to "no delivery found".
        error!("store API token is not set, content-store lookups will fail");
    }

    let addr = config.parse_server_addr()?;
    info!(
        addr = %addr,
        project_id = %config.store_project_id,
        dataset = %config.store_dataset,
        "configuration loaded"
    );

    let lookup = LookupClient::new(config.to_store_config())
        .context("failed to construct store lookup client")?;
    let state = AppState { lookup };

    server::start_server(state, addr, Duration::from_secs(config.request_timeout))
        .await
        .context("server failed")?;

    info!("voxtrack shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,voxtrack=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
