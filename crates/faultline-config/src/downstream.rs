use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Service called on behalf of inbound requests
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownstreamConfig {
    /// Base URL that request paths are joined onto
    pub base_url: Url,
    /// Overall request timeout, e.g. `"5s"` or `"500ms"`
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl DownstreamConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout string is not a valid duration
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid downstream timeout '{}': {e}", self.timeout))
    }
}

fn default_timeout() -> String {
    "10s".to_owned()
}
