//! HTTP Metrics Server binary.

use std::sync::Arc;

use anyhow::Context;
use http_metrics_server::metrics::{PrometheusSink, init_metrics, push_final};
use http_metrics_server::{AppState, Settings, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.socket_addr()?;

    tracing::info!(
        "Starting HTTP Metrics Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Service name: {}", settings.service_name);
    tracing::info!(
        "Environment: {} / {} / {}",
        settings.environment.name,
        settings.environment.scale_unit_id,
        settings.environment.namespace
    );

    let prometheus = init_metrics(&settings).context("failed to initialize metrics")?;

    let state = AppState::from_settings(&settings, Arc::new(PrometheusSink::new()))
        .with_prometheus(prometheus.clone());

    run_server(addr, state).await?;

    if let Some(endpoint) = settings.metrics.collector_endpoint.as_deref() {
        if let Err(e) = push_final(&prometheus, endpoint).await {
            tracing::warn!(error = %e, "Final metrics push failed");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
