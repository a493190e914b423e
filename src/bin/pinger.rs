use ::tracing::info;
use anyhow::{Context, Result};
use study_buddy::{app, config, tracing};

#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(feature = "dotenv")]
    dotenv::dotenv()?;

    let _guard = tracing::init()?;

    info!("Launching pinger, version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::load_pinger().context("Failed to load config")?;
    app::run_pinger(config).await
}
