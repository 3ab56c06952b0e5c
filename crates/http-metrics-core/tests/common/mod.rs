#![allow(dead_code)]
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use http_metrics_core::{
    AttributeSet, Clock, EnvironmentTags, InMemorySink, MetricsError, MetricsSink, RequestEnd,
    RequestMetrics, RequestToken, Timestamp,
};

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn at(millis: u64) -> Arc<Self> {
        Arc::new(Self {
            millis: AtomicU64::new(millis),
        })
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// Sink whose backend is always down.
#[derive(Debug, Default)]
pub struct FailingSink;

impl MetricsSink for FailingSink {
    fn increment_active_requests(&self, _: i64, _: &AttributeSet) -> http_metrics_core::Result<()> {
        Err(MetricsError::sink_unavailable("failing", "collector unreachable"))
    }

    fn record_duration(&self, _: f64, _: &AttributeSet) -> http_metrics_core::Result<()> {
        Err(MetricsError::rejected("duration", "backpressure"))
    }
}

/// Recorder wired to an in-memory sink and a manual clock at 1000ms.
pub fn recorder() -> (RequestMetrics, Arc<InMemorySink>, Arc<ManualClock>) {
    let sink = Arc::new(InMemorySink::new());
    let clock = ManualClock::at(1000);
    let metrics = RequestMetrics::with_clock(sink.clone(), EnvironmentTags::default(), clock.clone());
    (metrics, sink, clock)
}

/// A finished GET request with sensible defaults.
pub fn end<'a>(custom: &'a AttributeSet, start: RequestToken, end: Timestamp) -> RequestEnd<'a> {
    RequestEnd {
        protocol: "1.1",
        scheme: "http",
        method: "GET",
        route: Some("/greeting/{name}"),
        status_code: 200,
        user_agent: Some("curl/8.5.0"),
        error: None,
        custom_attributes: custom,
        start,
        end,
        duration_metric_disabled: false,
    }
}
