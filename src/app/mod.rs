use crate::config::{Config, PingerConfig, SentryConfig};
use anyhow::{Context, Result};
use axum::Router;
use futures_util::StreamExt;
use signal_hook::consts::TERM_SIGNALS;
use signal_hook_tokio::Signals;
use sqlx::PgPool;
use std::net::SocketAddr;
use tracing::{error, info};

pub mod api;
pub mod error;
pub mod metrics;
pub mod router;
pub mod state;

pub async fn run(config: Config, db: PgPool) -> Result<()> {
    info!("App config: {:?}", config);

    let _sentry = init_sentry(config.sentry.as_ref());
    spawn_metrics_server(config.metrics_listener_address);

    let state = state::AppState::new(db.clone());
    let app = router::new(state);

    serve(config.listener_address, app).await?;

    db.close().await;
    Ok(())
}

pub async fn run_pinger(config: PingerConfig) -> Result<()> {
    info!("App config: {:?}", config);

    let _sentry = init_sentry(config.sentry.as_ref());
    spawn_metrics_server(config.metrics_listener_address);

    serve(config.listener_address, router::new_pinger()).await
}

async fn serve(address: SocketAddr, app: Router) -> Result<()> {
    let mut signals = Signals::new(TERM_SIGNALS).context("Failed to register signal handlers")?;
    let signals_handle = signals.handle();

    info!(%address, "Server is starting...");

    axum::Server::try_bind(&address)
        .with_context(|| format!("Failed to bind {}", address))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(async move {
            if let Some(signal) = signals.next().await {
                info!(signal, "Received termination signal, shutting down");
            }
        })
        .await
        .context("Server failed")?;

    signals_handle.close();
    info!("Server stopped");

    Ok(())
}

fn spawn_metrics_server(address: Option<SocketAddr>) {
    if let Some(address) = address {
        tokio::spawn(async move {
            if let Err(err) = metrics::serve(address).await {
                error!(error = %format!("{:#}", err), "Metrics server stopped");
            }
        });
    }
}

fn init_sentry(config: Option<&SentryConfig>) -> Option<sentry::ClientInitGuard> {
    config.map(|config| {
        sentry::init((
            config.dsn.as_str(),
            sentry::ClientOptions {
                environment: config.environment.clone().map(Into::into),
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    })
}
