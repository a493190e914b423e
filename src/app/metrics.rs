use anyhow::{Context, Result};
use axum::{response::IntoResponse, routing::get, Router};
use http::{header, StatusCode};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};
use std::net::SocketAddr;
use tracing::{error, info};

pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

pub struct Metrics {
    sessions_logged: IntCounter,
    sessions_rejected: IntCounter,
}

impl Metrics {
    fn new() -> Self {
        Self {
            sessions_logged: register_int_counter!(
                "sessions_logged_total",
                "Study sessions written to the database"
            )
            .expect("failed to register sessions_logged_total"),
            sessions_rejected: register_int_counter!(
                "sessions_rejected_total",
                "Study sessions rejected as invalid input"
            )
            .expect("failed to register sessions_rejected_total"),
        }
    }

    pub fn sessions_logged(&self) -> &IntCounter {
        &self.sessions_logged
    }

    pub fn sessions_rejected(&self) -> &IntCounter {
        &self.sessions_rejected
    }
}

async fn metrics_handler() -> impl IntoResponse {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();

    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
            buffer,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn serve(address: SocketAddr) -> Result<()> {
    info!(%address, "Metrics server is starting...");

    axum::Server::try_bind(&address)
        .context("Failed to bind metrics listener")?
        .serve(router().into_make_service())
        .await
        .context("Metrics server failed")
}
