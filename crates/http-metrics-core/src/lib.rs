//! HTTP Metrics Core - request instrumentation without a web framework
//!
//! This crate provides the request metrics recorder: an active-request
//! up/down counter and a request-duration histogram, tagged with HTTP
//! semantic-convention attributes. Hosts call
//! [`RequestMetrics::request_start`] and [`RequestMetrics::request_end`]
//! around each request; measurements go to an injected [`MetricsSink`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use http_metrics_core::{
//!     AttributeSet, EnvironmentTags, InMemorySink, RequestEnd, RequestMetrics,
//! };
//!
//! let sink = Arc::new(InMemorySink::new());
//! let metrics = RequestMetrics::new(sink.clone(), EnvironmentTags::default());
//! let custom = AttributeSet::new();
//!
//! let token = metrics.request_start("http", "GET", &custom);
//! metrics.request_end(RequestEnd {
//!     protocol: "1.1",
//!     scheme: "http",
//!     method: "GET",
//!     route: Some("/greeting/{name}"),
//!     status_code: 200,
//!     user_agent: None,
//!     error: None,
//!     custom_attributes: &custom,
//!     start: token,
//!     end: metrics.now(),
//!     duration_metric_disabled: false,
//! });
//!
//! assert_eq!(sink.active_total(), 0);
//! assert_eq!(sink.durations().len(), 1);
//! ```

pub mod attributes;
pub mod clock;
pub mod error;
pub mod methods;
pub mod recorder;
pub mod sink;
pub mod status;

pub use attributes::{AttributeSet, AttributeValue, EnvironmentTags, keys};
pub use clock::{Clock, MonotonicClock, RequestToken, Timestamp};
pub use error::{MetricsError, Result};
pub use methods::{KnownMethods, UNKNOWN_METHOD};
pub use recorder::{
    ACTIVE_REQUESTS, DURATION_BUCKETS_MS, REQUEST_DURATION, RequestEnd, RequestMetrics,
};
pub use sink::{InMemorySink, Measurement, MetricsSink};
pub use status::StatusErrorTable;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
