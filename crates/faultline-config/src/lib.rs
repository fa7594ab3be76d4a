#![allow(clippy::must_use_candidate)]

pub mod downstream;
mod env;
mod loader;
pub mod server;
pub mod service;
pub mod telemetry;

use serde::Deserialize;

pub use downstream::*;
pub use server::*;
pub use service::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Service identity and error label
    #[serde(default)]
    pub service: ServiceConfig,
    /// Listener and health endpoint
    #[serde(default)]
    pub server: ServerConfig,
    /// Downstream service called by handlers
    #[serde(default)]
    pub downstream: Option<DownstreamConfig>,
    /// Logging and metrics
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
