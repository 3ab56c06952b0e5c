//! Metrics endpoint handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// Handler para el endpoint /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.prometheus() {
        Some(prometheus) => (StatusCode::OK, prometheus.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Metrics exporter not installed".to_string(),
        ),
    }
}
