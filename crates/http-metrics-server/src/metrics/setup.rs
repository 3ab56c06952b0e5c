//! Metrics setup and initialization.

use std::time::Duration;

use http_metrics_core::{DURATION_BUCKETS_MS, REQUEST_DURATION};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::metrics::sink::register_http_metrics;
use crate::settings::Settings;

/// Global label carrying the service name on every series.
pub const SERVICE_NAME_LABEL: &str = "service.name";

/// Prometheus text exposition format.
const PUSH_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Builder with the resource label and duration buckets applied.
pub fn exporter_builder(settings: &Settings) -> Result<PrometheusBuilder, ServerError> {
    let builder = PrometheusBuilder::new()
        .add_global_label(SERVICE_NAME_LABEL, settings.service_name.clone())
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &DURATION_BUCKETS_MS,
        )?;
    Ok(builder)
}

/// Inicializa el sistema de metricas y retorna el handle para el endpoint.
///
/// With a collector endpoint configured, the registry is also pushed there
/// every `push_interval_secs` from a background task. Must run inside a
/// Tokio runtime.
pub fn init_metrics(settings: &Settings) -> Result<PrometheusHandle, ServerError> {
    let builder = exporter_builder(settings)?;

    let handle = match settings.metrics.collector_endpoint.as_deref() {
        Some(endpoint) => {
            let (recorder, exporter) = builder
                .with_push_gateway(endpoint, settings.metrics.push_interval(), None, None, false)?
                .build()?;
            let handle = recorder.handle();
            metrics::set_global_recorder(recorder)
                .map_err(|e| ServerError::RecorderInstall(e.to_string()))?;

            tokio::spawn(async move {
                if let Err(e) = exporter.await {
                    warn!(error = ?e, "Metrics push exporter stopped");
                }
            });

            info!(
                endpoint,
                interval_secs = settings.metrics.push_interval_secs,
                "Pushing metrics to collector"
            );
            handle
        }
        None => builder.install_recorder()?,
    };

    register_http_metrics();
    spawn_upkeep(handle.clone(), settings.metrics.upkeep_interval());

    info!(service = %settings.service_name, "Metrics system initialized");
    Ok(handle)
}

/// Pushes the current registry once, the same way the push exporter does.
///
/// Called on shutdown so measurements taken since the last interval reach
/// the collector.
pub async fn push_final(handle: &PrometheusHandle, endpoint: &str) -> Result<(), ServerError> {
    let body = handle.render();

    reqwest::Client::new()
        .put(endpoint)
        .header(reqwest::header::CONTENT_TYPE, PUSH_CONTENT_TYPE)
        .body(body)
        .send()
        .await?
        .error_for_status()?;

    info!(endpoint, "Final metrics push sent");
    Ok(())
}

/// Periodically drains histogram buffers so they do not grow between scrapes.
pub fn spawn_upkeep(handle: PrometheusHandle, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}
