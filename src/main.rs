use ::tracing::info;
use anyhow::{Context, Result};
use study_buddy::{app, config, db, tracing};

#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(feature = "dotenv")]
    dotenv::dotenv()?;

    let _guard = tracing::init()?;

    info!(
        "Launching {}, version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = config::load().context("Failed to load config")?;
    let db = db::new_pool(&config.db);
    app::run(config, db).await
}
