use std::any::Any;
use std::borrow::Cow;

use axum::{
    Json,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errores de arranque del servidor.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A loaded setting has an unusable value.
    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: String, reason: String },

    /// The Prometheus exporter could not be built or installed.
    #[error("Failed to build metrics exporter: {0}")]
    Telemetry(#[from] metrics_exporter_prometheus::BuildError),

    /// Another global metrics recorder was installed first.
    #[error("Failed to install metrics recorder: {0}")]
    RecorderInstall(String),

    /// The final push to the collector failed.
    #[error("Failed to push metrics to collector: {0}")]
    Push(#[from] reqwest::Error),

    /// I/O error (binding the listener, serving).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn invalid_setting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Response extension naming the error a request ended with.
///
/// Error responses carry it so the metrics middleware can tag `error.type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledError {
    type_name: Cow<'static, str>,
}

impl UnhandledError {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

#[derive(Debug)]
pub enum AppError {
    /// Ruta no encontrada
    NotFound { path: String },

    /// Parametros invalidos
    BadRequest(String),

    /// Error interno
    Internal(String),
}

impl AppError {
    /// Type name reported as `error.type`.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NotFound",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Internal(_) => "Internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error, message) = match self {
            AppError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("No route for {}", path),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                msg,
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(UnhandledError::new(kind));
        response
    }
}

/// Converts a handler panic into a 500 tagged as `Panic`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let mut response = AppError::Internal("Handler panicked".to_string()).into_response();
    response.extensions_mut().insert(UnhandledError::new("Panic"));
    response
}
