//! Metrics sink seam.

use parking_lot::Mutex;

use crate::attributes::AttributeSet;
use crate::error::Result;

/// Backend receiving measurements from the recorder.
///
/// Implementations are created once per process and shared by every request,
/// so they must be `Send + Sync`. Export (push, scrape, batching) is the
/// sink's own business and must not block the caller.
pub trait MetricsSink: Send + Sync {
    /// Adds `delta` to the active-request up/down counter.
    fn increment_active_requests(&self, delta: i64, attributes: &AttributeSet) -> Result<()>;

    /// Records one request-duration observation, in milliseconds.
    fn record_duration(&self, milliseconds: f64, attributes: &AttributeSet) -> Result<()>;
}

/// A single measurement captured by [`InMemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    ActiveRequests { delta: i64, attributes: AttributeSet },
    Duration { milliseconds: f64, attributes: AttributeSet },
}

/// Sink that keeps every measurement in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    measurements: Mutex<Vec<Measurement>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in order.
    pub fn measurements(&self) -> Vec<Measurement> {
        self.measurements.lock().clone()
    }

    /// Every active-request delta with its attribute set.
    pub fn active_deltas(&self) -> Vec<(i64, AttributeSet)> {
        self.measurements
            .lock()
            .iter()
            .filter_map(|m| match m {
                Measurement::ActiveRequests { delta, attributes } => {
                    Some((*delta, attributes.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Net active-request count for an exact attribute set.
    pub fn active_requests(&self, attributes: &AttributeSet) -> i64 {
        self.measurements
            .lock()
            .iter()
            .map(|m| match m {
                Measurement::ActiveRequests {
                    delta,
                    attributes: recorded,
                } if recorded == attributes => *delta,
                _ => 0,
            })
            .sum()
    }

    /// Net active-request count across all attribute sets.
    pub fn active_total(&self) -> i64 {
        self.active_deltas().iter().map(|(delta, _)| delta).sum()
    }

    pub fn durations(&self) -> Vec<(f64, AttributeSet)> {
        self.measurements
            .lock()
            .iter()
            .filter_map(|m| match m {
                Measurement::Duration {
                    milliseconds,
                    attributes,
                } => Some((*milliseconds, attributes.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.measurements.lock().clear();
    }
}

impl MetricsSink for InMemorySink {
    fn increment_active_requests(&self, delta: i64, attributes: &AttributeSet) -> Result<()> {
        self.measurements.lock().push(Measurement::ActiveRequests {
            delta,
            attributes: attributes.clone(),
        });
        Ok(())
    }

    fn record_duration(&self, milliseconds: f64, attributes: &AttributeSet) -> Result<()> {
        self.measurements.lock().push(Measurement::Duration {
            milliseconds,
            attributes: attributes.clone(),
        });
        Ok(())
    }
}
