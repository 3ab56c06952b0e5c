//! Metrics module: exporter setup and the Prometheus-backed sink.

pub mod setup;
pub mod sink;

pub use setup::{init_metrics, push_final, spawn_upkeep};
pub use sink::{PrometheusSink, register_http_metrics};
