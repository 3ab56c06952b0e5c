//! Error types for the metrics recorder.
//!
//! Errors here only travel between a [`MetricsSink`](crate::MetricsSink) and
//! the recorder. The recorder logs and drops them; instrumentation never
//! fails the request it measures.

use thiserror::Error;

/// Failure reported by a metrics sink.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The backend cannot take measurements right now.
    #[error("Metrics sink '{sink}' unavailable: {message}")]
    SinkUnavailable {
        /// Name of the sink that failed
        sink: String,
        /// Description of what went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single measurement was refused.
    #[error("Measurement for '{metric}' rejected: {reason}")]
    Rejected {
        /// Metric the measurement belonged to
        metric: String,
        /// Why it was refused
        reason: String,
    },
}

impl MetricsError {
    /// Creates a SinkUnavailable error without a cause.
    pub fn sink_unavailable(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkUnavailable {
            sink: sink.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a SinkUnavailable error with a cause.
    pub fn sink_unavailable_with_cause<E>(
        sink: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SinkUnavailable {
            sink: sink.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a Rejected error.
    pub fn rejected(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::SinkUnavailable { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Type alias for Results with MetricsError.
pub type Result<T> = std::result::Result<T, MetricsError>;
