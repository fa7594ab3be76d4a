//! Logging and metrics for faultline services
//!
//! Logs go through `tracing`; metrics through OpenTelemetry when an OTLP
//! exporter is configured.

mod metadata;
pub mod metrics;

use std::time::Duration;

use faultline_config::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
use opentelemetry::global;
use opentelemetry_sdk::metrics::SdkMeterProvider;

/// Guard that flushes and shuts down exporters on drop
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// Force flush all pending metrics immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the meter provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(ref provider) = self.meter_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush metrics: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown meter provider: {e}");
        }
    }
}

/// Initialize logging and, when configured, metrics export
///
/// Installs a `tracing-subscriber` registry filtered by `log_filter`
/// (falling back to `info` when the filter does not parse). Returns a guard
/// that must be held for the lifetime of the application.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.map_or(LogFormat::Text, |c| c.log_format);
    let (text_layer, json_layer) = match format {
        LogFormat::Text => (
            Some(fmt::layer().with_target(true).with_file(false).with_line_number(false)),
            None,
        ),
        LogFormat::Json => (None, Some(fmt::layer().json().with_current_span(true))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    let mut guard = TelemetryGuard { meter_provider: None };

    if let Some(telemetry_config) = config
        && let Some(ref exporter_config) = telemetry_config.exporter
    {
        let provider = init_metrics(telemetry_config, exporter_config)?;
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);

        tracing::info!(
            endpoint = %exporter_config.endpoint,
            protocol = ?exporter_config.protocol,
            "metrics export enabled"
        );
    }

    Ok(guard)
}

/// Initialize OTLP metrics export
fn init_metrics(config: &TelemetryConfig, exporter_config: &ExporterConfig) -> anyhow::Result<SdkMeterProvider> {
    use opentelemetry_otlp::{MetricExporter, WithExportConfig};
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC metrics exporter: {e}"))?,
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP metrics exporter: {e}"))?,
    };

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(exporter_config.interval))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(metadata::build_resource(config))
        .with_reader(reader)
        .build())
}
