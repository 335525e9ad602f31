//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    defaults,
    schema::{CatalogSource, Config},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable naming a config file
pub const CONFIG_PATH_ENV: &str = "PR_CONTROLLER_CONFIG";
pub const BIND_ADDRESS_ENV: &str = "PR_CONTROLLER_BIND_ADDRESS";
pub const PORT_ENV: &str = "PR_CONTROLLER_PORT";
pub const CATALOG_SOURCE_ENV: &str = "PR_CONTROLLER_CATALOG_SOURCE";
pub const CATALOG_CATEGORY_ENV: &str = "PR_CONTROLLER_CATALOG_CATEGORY";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (if a path is given)
    /// 3. Built-in defaults
    ///
    /// Command line flags are applied on top by the caller.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment lookup
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::load_defaults(),
        };

        let config = Self::apply_env_overrides(config, env)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Missing keys fall back to their defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Check values serde cannot
    pub fn validate(config: &Config) -> Result<()> {
        if config.server.bind_address.trim().is_empty() {
            return Err(anyhow::anyhow!("server.bindAddress must not be empty"));
        }
        if config.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be between 1 and 65535"));
        }
        if config.catalog.source == CatalogSource::Discovery
            && config.catalog.category.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "catalog.category is required when catalog.source is discovery"
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(mut config: Config, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind_address) = env(BIND_ADDRESS_ENV) {
            config.server.bind_address = bind_address;
        }

        if let Some(port) = env(PORT_ENV) {
            config.server.port = port
                .parse()
                .with_context(|| format!("{} must be a port number, got '{}'", PORT_ENV, port))?;
        }

        if let Some(source) = env(CATALOG_SOURCE_ENV) {
            config.catalog.source = source.parse().map_err(anyhow::Error::msg)?;
        }

        if let Some(category) = env(CATALOG_CATEGORY_ENV) {
            config.catalog.category = category;
        }

        Ok(config)
    }
}
