//! Application state.

use std::sync::Arc;

use http_metrics_core::{MetricsSink, RequestMetrics};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::settings::Settings;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Recorder shared by every request.
    recorder: Arc<RequestMetrics>,
    /// Scrape handle; `None` when no Prometheus recorder is installed.
    prometheus: Option<PrometheusHandle>,
    service_name: Arc<str>,
    duration_metric_disabled: bool,
}

impl AppState {
    /// Creates a new AppState around an existing recorder.
    pub fn new(recorder: Arc<RequestMetrics>, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            recorder,
            prometheus: None,
            service_name: service_name.into(),
            duration_metric_disabled: false,
        }
    }

    /// Builds the recorder from settings on top of `sink`.
    pub fn from_settings(settings: &Settings, sink: Arc<dyn MetricsSink>) -> Self {
        let recorder = RequestMetrics::new(sink, settings.environment_tags());
        Self::new(Arc::new(recorder), settings.service_name.as_str())
            .with_duration_metric_disabled(settings.metrics.disable_duration_metric)
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    pub fn with_duration_metric_disabled(mut self, disabled: bool) -> Self {
        self.duration_metric_disabled = disabled;
        self
    }

    pub fn recorder(&self) -> &Arc<RequestMetrics> {
        &self.recorder
    }

    pub fn prometheus(&self) -> Option<&PrometheusHandle> {
        self.prometheus.as_ref()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn duration_metric_disabled(&self) -> bool {
        self.duration_metric_disabled
    }
}
