//! HTTP Metrics Server - demo axum service for the request metrics recorder
//!
//! Wires [`http_metrics_core::RequestMetrics`] into axum through a tower
//! layer, exports through the Prometheus recorder (scrape and optional
//! push) and serves a small greeting API as the measured workload.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use error::{AppError, ServerError, UnhandledError};
pub use handlers::health::HealthResponse;
pub use server::{create_router, run_server, with_middleware};
pub use settings::Settings;
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
