use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(error_label = %config.service.error_label(), "configuration loaded");

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the error label is malformed or the downstream
    /// timeout is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_error_label()?;
        self.validate_downstream()?;
        self.validate_health()?;
        Ok(())
    }

    /// Labels are matched by clients, so keep them to upper-snake tokens
    fn validate_error_label(&self) -> anyhow::Result<()> {
        let label = self.service.error_label();

        if label.is_empty() {
            anyhow::bail!("service.error_label must not be empty");
        }

        if !label.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
            anyhow::bail!("service.error_label '{label}' may only contain A-Z, 0-9 and '_'");
        }

        Ok(())
    }

    fn validate_downstream(&self) -> anyhow::Result<()> {
        let Some(ref downstream) = self.downstream else {
            return Ok(());
        };

        if downstream.timeout()?.is_zero() {
            anyhow::bail!("downstream.timeout must be greater than zero");
        }

        if downstream.base_url.cannot_be_a_base() {
            anyhow::bail!("downstream.base_url '{}' cannot be used as a base URL", downstream.base_url);
        }

        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }
        Ok(())
    }
}
