use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// Logging and metrics configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name reported with exported metrics
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// Log line format
    #[serde(default)]
    pub log_format: LogFormat,
    /// OTLP metrics exporter; metrics are not exported when absent
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// OTLP endpoint URL
    pub endpoint: Url,
    /// Export protocol
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Export interval in seconds
    #[serde(default = "default_interval")]
    pub interval: u64,
}

/// OTLP export protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    /// gRPC (default)
    #[default]
    Grpc,
    /// HTTP/protobuf
    HttpProto,
}

fn default_service_name() -> String {
    "faultline".to_string()
}

const fn default_interval() -> u64 {
    30
}
