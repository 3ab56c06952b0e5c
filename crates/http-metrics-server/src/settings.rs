//! Configuracion del servidor.
//!
//! Loaded once at startup, lowest precedence first: built-in defaults, an
//! optional `config/http-metrics.{toml,yaml,json}` file, then environment
//! variables such as `HTTP_METRICS_SERVER__PORT=9090` or
//! `HTTP_METRICS_METRICS__COLLECTOR_ENDPOINT=http://pushgateway:9091/metrics/job/http-metrics`.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use http_metrics_core::EnvironmentTags;
use serde::Deserialize;

use crate::error::ServerError;

/// Optional settings file, extension resolved by the `config` crate.
pub const DEFAULT_CONFIG_FILE: &str = "config/http-metrics";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "HTTP_METRICS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Reported as the `service.name` resource label.
    pub service_name: String,
    pub server: ServerSettings,
    pub metrics: MetricsSettings,
    pub environment: EnvironmentSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// Push endpoint of the metrics collector; scrape-only when unset.
    pub collector_endpoint: Option<String>,
    pub push_interval_secs: u64,
    pub upkeep_interval_secs: u64,
    pub disable_duration_metric: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSettings {
    pub name: String,
    pub scale_unit_id: String,
    pub namespace: String,
}

impl Settings {
    /// Defaults only; callers add sources on top.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ServerError> {
        let builder = Config::builder()
            .set_default("service_name", "http-metrics")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("metrics.push_interval_secs", 10)?
            .set_default("metrics.upkeep_interval_secs", 5)?
            .set_default("metrics.disable_duration_metric", false)?
            .set_default("environment.name", "local")?
            .set_default("environment.scale_unit_id", "development")?
            .set_default("environment.namespace", "local-development")?;
        Ok(builder)
    }

    /// Loads defaults, the optional settings file and the environment.
    pub fn load() -> Result<Self, ServerError> {
        let builder = Self::builder()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ServerError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if self.service_name.trim().is_empty() {
            return Err(ServerError::invalid_setting("service_name", "cannot be empty"));
        }
        if self.metrics.push_interval_secs == 0 {
            return Err(ServerError::invalid_setting(
                "metrics.push_interval_secs",
                "must be greater than 0",
            ));
        }
        if self.metrics.upkeep_interval_secs == 0 {
            return Err(ServerError::invalid_setting(
                "metrics.upkeep_interval_secs",
                "must be greater than 0",
            ));
        }
        if let Some(endpoint) = &self.metrics.collector_endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ServerError::invalid_setting(
                    "metrics.collector_endpoint",
                    format!("'{}' is not an http(s) URL", endpoint),
                ));
            }
        }
        Ok(())
    }

    /// Resolves the listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .map_err(|e| ServerError::invalid_setting("server.host", e.to_string()))?
            .next()
            .ok_or_else(|| {
                ServerError::invalid_setting(
                    "server.host",
                    format!("'{}' did not resolve to an address", self.server.host),
                )
            })
    }

    pub fn environment_tags(&self) -> EnvironmentTags {
        EnvironmentTags::new(
            self.environment.name.as_str(),
            self.environment.scale_unit_id.as_str(),
            self.environment.namespace.as_str(),
        )
    }
}

impl MetricsSettings {
    pub fn push_interval(&self) -> Duration {
        Duration::from_secs(self.push_interval_secs)
    }

    pub fn upkeep_interval(&self) -> Duration {
        Duration::from_secs(self.upkeep_interval_secs)
    }
}
