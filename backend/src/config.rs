//! # Backend Configuration
//!
//! Settings are read from a YAML file and may be overridden by environment
//! variables:
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! data_directory: "./data"
//! static_directory: "../frontend/dist"
//! log_filter: "info"
//! ```
//!
//! The file is taken from `FIXACAO_CONFIG` when set, otherwise from
//! `fixacao.yaml` in the working directory if present. `FIXACAO_BIND_ADDRESS`
//! and `FIXACAO_DATA_DIR` override the corresponding settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "FIXACAO_CONFIG";
pub const BIND_ADDRESS_ENV: &str = "FIXACAO_BIND_ADDRESS";
pub const DATA_DIR_ENV: &str = "FIXACAO_DATA_DIR";
const DEFAULT_CONFIG_FILE: &str = "fixacao.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub bind_address: SocketAddr,
    /// Frontend origin allowed by CORS
    pub allowed_origin: String,
    /// Directory holding the reference data tables
    pub data_directory: PathBuf,
    /// Built frontend served for non-API paths, if any
    pub static_directory: Option<PathBuf>,
    /// Default tracing filter when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            allowed_origin: "http://localhost:8080".to_string(),
            data_directory: PathBuf::from("data"),
            static_directory: None,
            log_filter: "info".to_string(),
        }
    }
}

impl BackendConfig {
    /// Load the configuration from the default locations and the environment
    pub fn load() -> Result<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            Err(_) => Self::default(),
        };

        config.with_overrides(
            std::env::var(BIND_ADDRESS_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok(),
        )
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Apply environment overrides on top of the file settings
    pub fn with_overrides(mut self, bind_address: Option<String>, data_directory: Option<String>) -> Result<Self> {
        if let Some(address) = bind_address {
            self.bind_address = address
                .parse()
                .with_context(|| format!("Invalid {} '{}'", BIND_ADDRESS_ENV, address))?;
        }
        if let Some(directory) = data_directory {
            self.data_directory = PathBuf::from(directory);
        }
        Ok(self)
    }
}
