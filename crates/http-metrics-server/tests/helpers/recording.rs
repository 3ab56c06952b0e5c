//! App wired to an in-memory sink so tests can inspect measurements.

use std::sync::Arc;

use axum::Router;
use http_metrics_core::{
    AttributeSet, AttributeValue, EnvironmentTags, InMemorySink, RequestMetrics,
};
use http_metrics_server::{AppState, create_router, with_middleware};

use super::client::TestClient;

/// Sink plus the client driving the app it is attached to.
pub struct Recorded {
    pub client: TestClient,
    pub sink: Arc<InMemorySink>,
}

impl Recorded {
    /// Attributes of the only duration observation recorded so far.
    pub fn single_duration(&self) -> (f64, AttributeSet) {
        let durations = self.sink.durations();
        assert_eq!(durations.len(), 1, "expected one duration, got {:?}", durations);
        durations.into_iter().next().unwrap()
    }

    pub fn attr<'a>(attrs: &'a AttributeSet, key: &str) -> Option<&'a AttributeValue> {
        attrs.get(key)
    }
}

fn state(sink: Arc<InMemorySink>) -> AppState {
    let recorder = RequestMetrics::new(sink, EnvironmentTags::new("test", "su-1", "ns-test"));
    AppState::new(Arc::new(recorder), "http-metrics-test")
}

/// Default router recording into an [`InMemorySink`].
pub fn recorded_app() -> Recorded {
    let sink = Arc::new(InMemorySink::new());
    let client = TestClient::new(create_router(state(sink.clone())));
    Recorded { client, sink }
}

/// Custom routes behind the standard middleware stack.
pub fn app_with(routes: Router<AppState>) -> Recorded {
    let sink = Arc::new(InMemorySink::new());
    let client = TestClient::new(with_middleware(routes, state(sink.clone())));
    Recorded { client, sink }
}
