//! [`MetricsSink`] backed by the `metrics` facade.

use http_metrics_core::{
    ACTIVE_REQUESTS, AttributeSet, MetricsError, MetricsSink, REQUEST_DURATION,
};
use metrics::{Label, Unit, gauge, histogram};

/// Forwards measurements to whatever recorder is installed globally
/// (the Prometheus exporter in production).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusSink;

impl PrometheusSink {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for PrometheusSink {
    fn increment_active_requests(
        &self,
        delta: i64,
        attributes: &AttributeSet,
    ) -> http_metrics_core::Result<()> {
        let gauge = gauge!(ACTIVE_REQUESTS, to_labels(attributes));
        if delta >= 0 {
            gauge.increment(delta as f64);
        } else {
            gauge.decrement(delta.unsigned_abs() as f64);
        }
        Ok(())
    }

    fn record_duration(
        &self,
        milliseconds: f64,
        attributes: &AttributeSet,
    ) -> http_metrics_core::Result<()> {
        if !milliseconds.is_finite() || milliseconds < 0.0 {
            return Err(MetricsError::rejected(
                REQUEST_DURATION,
                format!("invalid duration {}", milliseconds),
            ));
        }
        histogram!(REQUEST_DURATION, to_labels(attributes)).record(milliseconds);
        Ok(())
    }
}

/// Converts attributes to labels; arrays become comma separated values.
pub fn to_labels(attributes: &AttributeSet) -> Vec<Label> {
    attributes
        .iter()
        .map(|(key, value)| Label::new(key.to_string(), value.to_string()))
        .collect()
}

/// Registra las metricas HTTP
pub fn register_http_metrics() {
    metrics::describe_gauge!(ACTIVE_REQUESTS, Unit::Count, "Active HTTP requests");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        Unit::Milliseconds,
        "Duration of HTTP requests"
    );
}
