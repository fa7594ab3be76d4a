//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::{Config, DownstreamConfig, HealthConfig, ServerConfig, ServiceConfig};
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                ..Config::default()
            },
        }
    }

    /// Name the service so the error label is derived from it
    pub fn with_service_name(mut self, name: &str) -> Self {
        self.config.service = ServiceConfig {
            name: Some(name.to_owned()),
            error_label: None,
        };
        self
    }

    /// Point the downstream client at a mock service
    pub fn with_downstream(mut self, base_url: &str) -> Self {
        self.config.downstream = Some(DownstreamConfig {
            base_url: Url::parse(base_url).expect("valid URL"),
            timeout: "2s".to_owned(),
        });
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
