//! Prediction API - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, Settings};
use prediction_service::ServiceContext;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Prediction API v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("failed to load settings")?;

    // A missing or corrupt artifact refuses startup rather than failing
    // per-request later
    let context = ServiceContext::load(&settings.model_dir)
        .context("failed to load frozen model artifacts")?;

    run_server(&settings, context).await?;

    Ok(())
}
