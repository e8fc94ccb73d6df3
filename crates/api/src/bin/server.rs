//! Weather Alert Pipeline - REST server

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Weather Alert Server v{} ===", env!("CARGO_PKG_VERSION"));
    run_server(config).await
}
