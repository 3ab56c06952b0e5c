//! Request metrics recorder.
//!
//! Two hooks per request: [`RequestMetrics::request_start`] bumps the
//! active-request counter, [`RequestMetrics::request_end`] takes it back down
//! with the identical attribute set and records the duration histogram.
//! The recorder holds no per-request state; the start timestamp travels in
//! the [`RequestToken`] handed back to the host.

use std::sync::Arc;

use tracing::warn;

use crate::attributes::{AttributeSet, EnvironmentTags, keys};
use crate::clock::{Clock, MonotonicClock, RequestToken, Timestamp};
use crate::methods::KnownMethods;
use crate::sink::MetricsSink;
use crate::status::StatusErrorTable;

/// Name of the active-request up/down counter.
pub const ACTIVE_REQUESTS: &str = "http_server_active_requests";

/// Name of the request-duration histogram.
pub const REQUEST_DURATION: &str = "http_server_request_duration_milliseconds";

/// Explicit histogram boundaries for [`REQUEST_DURATION`], in milliseconds.
pub const DURATION_BUCKETS_MS: [f64; 15] = [
    0.0, 5.0, 10.0, 25.0, 50.0, 75.0, 100.0, 250.0, 500.0, 750.0, 1000.0, 2500.0, 5000.0,
    7500.0, 10000.0,
];

/// Everything known about a request once it has finished.
#[derive(Debug, Clone)]
pub struct RequestEnd<'a> {
    /// Protocol version, e.g. `1.1` or `2`.
    pub protocol: &'a str,
    pub scheme: &'a str,
    /// Raw method; resolved again, independently of `request_start`.
    pub method: &'a str,
    /// Matched route template, `None` when nothing matched.
    pub route: Option<&'a str>,
    pub status_code: u16,
    pub user_agent: Option<&'a str>,
    /// Type name of an unhandled error, if the request produced one.
    pub error: Option<&'a str>,
    pub custom_attributes: &'a AttributeSet,
    pub start: RequestToken,
    pub end: Timestamp,
    pub duration_metric_disabled: bool,
}

/// Records active requests and request durations against a [`MetricsSink`].
///
/// Configuration is fixed at construction, so one instance can be shared by
/// every request without synchronisation.
pub struct RequestMetrics {
    sink: Arc<dyn MetricsSink>,
    clock: Arc<dyn Clock>,
    environment: AttributeSet,
    known_methods: KnownMethods,
    status_errors: StatusErrorTable,
}

impl RequestMetrics {
    pub fn new(sink: Arc<dyn MetricsSink>, environment: EnvironmentTags) -> Self {
        Self::with_clock(sink, environment, Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(
        sink: Arc<dyn MetricsSink>,
        environment: EnvironmentTags,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sink,
            clock,
            environment: environment.to_attributes(),
            known_methods: KnownMethods::standard(),
            status_errors: StatusErrorTable::standard(),
        }
    }

    /// Replaces the method set and status table.
    pub fn with_tables(mut self, known_methods: KnownMethods, status_errors: StatusErrorTable) -> Self {
        self.known_methods = known_methods;
        self.status_errors = status_errors;
        self
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn resolve_method(&self, method: &str) -> String {
        self.known_methods.resolve(method)
    }

    pub fn resolve_error_type<'a>(&self, status_code: u16, error: Option<&'a str>) -> Option<&'a str> {
        self.status_errors.resolve_error_type(status_code, error)
    }

    /// Marks a request as in flight.
    pub fn request_start(
        &self,
        scheme: &str,
        method: &str,
        custom_attributes: &AttributeSet,
    ) -> RequestToken {
        let attributes = self.request_attributes(scheme, method, custom_attributes);
        self.add_active(1, &attributes);
        RequestToken::new(self.clock.now())
    }

    /// Marks a request as finished and records its duration.
    pub fn request_end(&self, end: RequestEnd<'_>) {
        let mut attributes = self.request_attributes(end.scheme, end.method, end.custom_attributes);
        self.add_active(-1, &attributes);

        if end.duration_metric_disabled {
            return;
        }

        attributes
            .put(keys::NETWORK_PROTOCOL_VERSION, end.protocol)
            .put(keys::HTTP_RESPONSE_STATUS_CODE, end.status_code)
            .put_opt(keys::HTTP_USER_AGENT, end.user_agent);

        // Only a matched template may appear as http.route
        match end.route {
            Some(route) => {
                attributes.put(keys::HTTP_ROUTE, route);
            }
            None => {
                attributes.remove(keys::HTTP_ROUTE);
            }
        }

        // error.type may already come from the caller
        if let Some(error_type) = self.resolve_error_type(end.status_code, end.error) {
            attributes.put_if_absent(keys::ERROR_TYPE, error_type);
        }

        let duration = end.end.millis_since(end.start.start());
        if let Err(e) = self.sink.record_duration(duration, &attributes) {
            warn!(error = %e, metric = REQUEST_DURATION, "Failed to record request duration");
        }
    }

    /// Attribute set shared by the start and end hooks.
    ///
    /// Built-ins go last so they stay canonical when a custom key collides.
    fn request_attributes(&self, scheme: &str, method: &str, custom: &AttributeSet) -> AttributeSet {
        let mut attributes = self.environment.clone();
        attributes
            .merge(custom)
            .put(keys::URL_SCHEME, scheme)
            .put(keys::HTTP_REQUEST_METHOD, self.resolve_method(method));
        attributes
    }

    fn add_active(&self, delta: i64, attributes: &AttributeSet) {
        if let Err(e) = self.sink.increment_active_requests(delta, attributes) {
            warn!(error = %e, metric = ACTIVE_REQUESTS, delta, "Failed to update active requests");
        }
    }
}

impl std::fmt::Debug for RequestMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestMetrics")
            .field("environment", &self.environment)
            .field("known_methods", &self.known_methods)
            .field("status_errors", &self.status_errors)
            .finish_non_exhaustive()
    }
}
