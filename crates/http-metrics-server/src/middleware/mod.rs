//! Middleware stack para el servidor HTTP.
//!
//! - `MetricsLayer`: active-request gauge and duration histogram per request
//! - `RequestContext`: what the metrics layer reads from each request
//!
//! Request IDs and request spans come from `tower-http`.

mod context;
mod metrics;

pub use context::{FORWARDED_PROTO_HEADER, RequestContext, SITE_ID_HEADER, TENANT_ID_HEADER};
pub use metrics::{MetricsLayer, MetricsMiddleware};
