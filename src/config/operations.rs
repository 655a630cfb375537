//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{FactoryError, Result};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming a config file, read by the CLI.
pub const CONFIG_ENV_VAR: &str = "OCI_FACTORY_CONFIG";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(FactoryError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FactoryError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| FactoryError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - endpoint, repository, workflow, organization and token variable names must be non-empty
    /// - `retry_attempts` and `locate_attempts` must be positive
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_url", &self.api_url),
            ("web_url", &self.web_url),
            ("repository", &self.repository),
            ("workflow", &self.workflow),
            ("source_org", &self.source_org),
            ("token_env_var", &self.token_env_var),
        ] {
            if value.trim().is_empty() {
                return Err(FactoryError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(FactoryError::UserError(
                "config validation failed: request_timeout_secs must be greater than 0"
                    .to_string(),
            ));
        }

        if self.retry_attempts == 0 {
            return Err(FactoryError::UserError(
                "config validation failed: retry_attempts must be greater than 0".to_string(),
            ));
        }

        if self.locate_attempts == 0 {
            return Err(FactoryError::UserError(
                "config validation failed: locate_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn locate_interval(&self) -> Duration {
        Duration::from_secs(self.locate_interval_secs)
    }

    pub fn locate_lookback(&self) -> Duration {
        Duration::from_secs(self.locate_lookback_minutes.saturating_mul(60))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
