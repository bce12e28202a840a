// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (OPENSHEET_SHEETS__API_KEY, ...)
            .add_source(
                Environment::with_prefix("OPENSHEET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Reject configurations the gateway cannot serve with.
    pub fn validate(&self) -> Result<()> {
        if self.sheets.api_key.is_empty() {
            return Err(GatewayError::Config(
                "missing Google API key (set GOOGLE_API_KEY or sheets.api_key)".to_string(),
            ));
        }
        if self.cache.key_prefix.is_empty() {
            return Err(GatewayError::Config("cache.key_prefix must not be empty".to_string()));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".opensheet")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
