//! Configuration traits
//!
//! Configuration is read from TOML and then overlaid with `TOLLGATE_*`
//! environment variables before validation.

use crate::{Result, TollgateError};
use std::path::Path;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TOLLGATE_";

/// Core trait for Tollgate configuration types
pub trait TollgateConfig: Clone + Default + Send + Sync + 'static {
    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    fn from_toml_str(content: &str) -> Result<Self>;

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TollgateError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Set a configuration value from a string
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()>;

    /// Merge with environment variables, e.g. `TOLLGATE_NFT_STATIC_GAS=1500`
    fn merge_with_env(&mut self) -> Result<()> {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                self.set_from_string(&config_key.to_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()>;
}

/// Parse a numeric override, naming the key on failure.
pub fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| TollgateError::config(format!("{key}: invalid number {value:?}: {e}")))
}
