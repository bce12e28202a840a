// CLI module for opensheet
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, AppConfig};
use clap::Parser;

/// opensheet - serve Google Sheets ranges as JSON
#[derive(Parser, Debug)]
#[command(name = "opensheet", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.opensheet/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Google API key used for the Sheets API
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Disable the response cache
    #[arg(long)]
    pub no_cache: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(key) = &self.api_key {
            config.sheets.api_key = ApiKey::new(key.clone());
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
    }
}
