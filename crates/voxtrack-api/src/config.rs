//! Configuration management for the voxtrack delivery lookup service.
//!
//! Store credentials live in an explicit struct constructed at startup and
//! passed into the lookup client; nothing reads the process environment ad
//! hoc after load.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use voxtrack_lookup::StoreConfig;

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The store project id has no sensible default and must come from the
/// configuration file or environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Content store
    /// Content-store project identifier.
    ///
    /// Environment variable: `STORE_PROJECT_ID`
    #[serde(default, alias = "STORE_PROJECT_ID")]
    pub store_project_id: String,
    /// Dataset holding the delivery records.
    ///
    /// Environment variable: `STORE_DATASET`
    #[serde(default = "default_store_dataset", alias = "STORE_DATASET")]
    pub store_dataset: String,
    /// Bearer token for the store's query API. An empty token does not halt
    /// startup; it is reported at error level and every lookup degrades to
    /// "no delivery found".
    ///
    /// Environment variable: `STORE_API_TOKEN`
    #[serde(default, alias = "STORE_API_TOKEN")]
    pub store_api_token: String,
    /// Store API version date.
    ///
    /// Environment variable: `STORE_API_VERSION`
    #[serde(default = "default_store_api_version", alias = "STORE_API_VERSION")]
    pub store_api_version: String,
    /// Base URL override for self-hosted stores and tests.
    ///
    /// Environment variable: `STORE_API_BASE`
    #[serde(default, alias = "STORE_API_BASE")]
    pub store_api_base: Option<String>,
    /// Timeout for one store query in seconds.
    ///
    /// Environment variable: `LOOKUP_TIMEOUT_SECONDS`
    #[serde(default = "default_lookup_timeout", alias = "LOOKUP_TIMEOUT_SECONDS")]
    pub lookup_timeout_seconds: u64,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the lookup crate's store configuration.
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            project_id: self.store_project_id.clone(),
            dataset: self.store_dataset.clone(),
            api_token: self.store_api_token.clone(),
            api_version: self.store_api_version.clone(),
            api_base: self.store_api_base.clone(),
            timeout: Duration::from_secs(self.lookup_timeout_seconds),
        }
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.store_project_id.is_empty() {
            anyhow::bail!("store_project_id must be set");
        }

        if self.store_dataset.is_empty() {
            anyhow::bail!("store_dataset must not be empty");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.lookup_timeout_seconds == 0 {
            anyhow::bail!("lookup_timeout_seconds must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            store_project_id: String::new(),
            store_dataset: default_store_dataset(),
            store_api_token: String::new(),
            store_api_version: default_store_api_version(),
            store_api_base: None,
            lookup_timeout_seconds: default_lookup_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_store_dataset() -> String {
    "production".to_string()
}

fn default_store_api_version() -> String {
    "v2021-10-21".to_string()
}

fn default_lookup_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}
