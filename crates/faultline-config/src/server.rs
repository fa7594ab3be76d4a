use std::net::SocketAddr;

use serde::Deserialize;

/// `[server]` section
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Defaults to `0.0.0.0:8080` when unset
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Liveness route mounted next to the application's routes
///
/// It answers through the same router, so when disabled a request to its
/// path gets the ordinary not-found envelope.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::from("/health"),
        }
    }
}
