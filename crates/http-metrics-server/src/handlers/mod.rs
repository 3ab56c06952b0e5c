//! HTTP handlers.

pub mod fallback;
pub mod greeting;
pub mod health;
pub mod metrics;
