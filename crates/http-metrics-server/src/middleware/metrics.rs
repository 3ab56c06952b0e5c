//! Middleware que registra metricas HTTP para cada request.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    http::{Request, Response},
};
use http_metrics_core::{AttributeSet, RequestEnd, RequestMetrics, RequestToken};
use tower::{Layer, Service};
use tracing::debug;

use super::context::RequestContext;
use crate::error::UnhandledError;

/// Status passed for requests dropped before a response existed; the
/// duration metric is skipped for them, so it never reaches the backend.
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Layer that records active requests and request durations.
///
/// Apply it with `Router::layer` so the matched route template is already
/// in the request extensions.
#[derive(Clone)]
pub struct MetricsLayer {
    recorder: Arc<RequestMetrics>,
    duration_metric_disabled: bool,
}

impl MetricsLayer {
    pub fn new(recorder: Arc<RequestMetrics>) -> Self {
        Self {
            recorder,
            duration_metric_disabled: false,
        }
    }

    pub fn disable_duration_metric(mut self, disabled: bool) -> Self {
        self.duration_metric_disabled = disabled;
        self
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware {
            inner,
            recorder: self.recorder.clone(),
            duration_metric_disabled: self.duration_metric_disabled,
        }
    }
}

/// Middleware that wraps every request in a start/end recorder pair.
#[derive(Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
    recorder: Arc<RequestMetrics>,
    duration_metric_disabled: bool,
}

impl<S, ResBody> Service<Request<Body>> for MetricsMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let in_flight = InFlightRequest::start(
            self.recorder.clone(),
            RequestContext::from_request(&request),
            self.duration_metric_disabled,
        );

        let mut inner = self.inner.clone();

        Box::pin(async move {
            // An error or a dropped future leaves the guard to decrement
            let response = inner.call(request).await?;
            in_flight.finish(&response);
            Ok(response)
        })
    }
}

/// Guard pairing every `request_start` with exactly one `request_end`.
struct InFlightRequest {
    recorder: Arc<RequestMetrics>,
    context: RequestContext,
    custom_attributes: AttributeSet,
    token: RequestToken,
    duration_metric_disabled: bool,
    finished: bool,
}

impl InFlightRequest {
    fn start(
        recorder: Arc<RequestMetrics>,
        context: RequestContext,
        duration_metric_disabled: bool,
    ) -> Self {
        let custom_attributes = context.custom_attributes();
        let token = recorder.request_start(&context.scheme, &context.method, &custom_attributes);

        Self {
            recorder,
            context,
            custom_attributes,
            token,
            duration_metric_disabled,
            finished: false,
        }
    }

    fn finish<B>(mut self, response: &Response<B>) {
        let status = response.status().as_u16();
        let error = response
            .extensions()
            .get::<UnhandledError>()
            .map(UnhandledError::type_name);

        let duration_ms = self.end(status, error, self.duration_metric_disabled);
        self.finished = true;

        debug!(
            method = %self.context.method,
            route = self.context.route.as_deref().unwrap_or("<unmatched>"),
            status,
            duration_ms,
            "Request metrics recorded"
        );
    }

    fn end(&self, status_code: u16, error: Option<&str>, duration_metric_disabled: bool) -> f64 {
        let end = self.recorder.now();
        self.recorder.request_end(RequestEnd {
            protocol: self.context.protocol,
            scheme: &self.context.scheme,
            method: &self.context.method,
            route: self.context.route.as_deref(),
            status_code,
            user_agent: self.context.user_agent.as_deref(),
            error,
            custom_attributes: &self.custom_attributes,
            start: self.token,
            end,
            duration_metric_disabled,
        });
        end.millis_since(self.token.start())
    }
}

impl Drop for InFlightRequest {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                method = %self.context.method,
                route = self.context.route.as_deref().unwrap_or("<unmatched>"),
                "Request dropped before completion"
            );
            self.end(CLIENT_CLOSED_REQUEST, None, true);
        }
    }
}
