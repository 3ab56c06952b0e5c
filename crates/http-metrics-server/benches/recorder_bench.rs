use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::sync::Arc;

use http_metrics_core::{
    AttributeSet, EnvironmentTags, MetricsSink, RequestEnd, RequestMetrics,
};
use http_metrics_server::metrics::PrometheusSink;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Sink que descarta todo, para medir solo el recorder
struct NoopSink;

impl MetricsSink for NoopSink {
    fn increment_active_requests(
        &self,
        _delta: i64,
        _attributes: &AttributeSet,
    ) -> http_metrics_core::Result<()> {
        Ok(())
    }

    fn record_duration(
        &self,
        _milliseconds: f64,
        _attributes: &AttributeSet,
    ) -> http_metrics_core::Result<()> {
        Ok(())
    }
}

/// Crea atributos custom de prueba con N query params
fn custom_attributes(num_params: usize) -> AttributeSet {
    let mut attrs = AttributeSet::new();
    attrs.put("tenant.id", 42i64).put("site.id", 7i64);
    for i in 0..num_params {
        attrs.put(format!("param{}", i), format!("value-{}", i));
    }
    attrs
}

fn one_request(metrics: &RequestMetrics, custom: &AttributeSet) {
    let token = metrics.request_start("http", "GET", custom);
    metrics.request_end(RequestEnd {
        protocol: "1.1",
        scheme: "http",
        method: "GET",
        route: Some("/greeting/{name}"),
        status_code: 200,
        user_agent: Some("criterion"),
        error: None,
        custom_attributes: custom,
        start: token,
        end: metrics.now(),
        duration_metric_disabled: false,
    });
}

/// Benchmark: request_start + request_end sin backend
fn bench_recorder_noop(c: &mut Criterion) {
    let metrics = RequestMetrics::new(Arc::new(NoopSink), EnvironmentTags::default());

    let mut group = c.benchmark_group("recorder_noop");
    for num_params in [0, 5, 20] {
        let custom = custom_attributes(num_params);
        group.bench_with_input(BenchmarkId::from_parameter(num_params), &custom, |b, custom| {
            b.iter(|| one_request(&metrics, std::hint::black_box(custom)));
        });
    }
    group.finish();
}

/// Benchmark: request_start + request_end contra el recorder Prometheus
fn bench_recorder_prometheus(c: &mut Criterion) {
    let recorder = PrometheusBuilder::new().build_recorder();
    let metrics = RequestMetrics::new(Arc::new(PrometheusSink::new()), EnvironmentTags::default());
    let custom = custom_attributes(5);

    metrics::with_local_recorder(&recorder, || {
        c.bench_function("recorder_prometheus", |b| {
            b.iter(|| one_request(&metrics, std::hint::black_box(&custom)));
        });
    });
}

/// Benchmark: error.type resolution
fn bench_resolve_error_type(c: &mut Criterion) {
    let metrics = RequestMetrics::new(Arc::new(NoopSink), EnvironmentTags::default());

    c.bench_function("resolve_error_type", |b| {
        b.iter(|| {
            let tabled = metrics.resolve_error_type(std::hint::black_box(404), None);
            let named = metrics.resolve_error_type(std::hint::black_box(418), Some("TeapotError"));
            std::hint::black_box((tabled, named))
        });
    });
}

criterion_group!(
    benches,
    bench_recorder_noop,
    bench_recorder_prometheus,
    bench_resolve_error_type,
);
criterion_main!(benches);
