use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn up(service: impl Into<String>) -> Self {
        Self {
            status: "UP",
            service: service.into(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::up(state.service_name()))
}
