//! Test helpers para http-metrics-server.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod recording;

pub use client::{TestClient, TestResponse, client};
pub use recording::{Recorded, app_with, recorded_app};
