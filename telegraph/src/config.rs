//! Startup configuration
//!
//! Read once from a JSON file at launch. A missing, unreadable or invalid file
//! never stops the client; the built-in defaults are used instead.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use shared::{Component, SharedError, channel_url, component_info, component_warn};
use crate::error::{TelegraphError, TelegraphResult};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "TELEGRAPH_CONFIG_PATH";

/// Configuration file used when nothing else is specified
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Client configuration, immutable after startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TelegraphConfig {
    pub channel: String,
    pub server: String,
    pub port: String,
    /// Drive real GPIO pins rather than the virtual key and logging sounder
    pub gpio: bool,
    /// BCM number of the key input (pulled up, pressed = low)
    pub key_pin: u32,
    /// BCM number of the active-high sounder output
    pub sounder_pin: u32,
    /// BCM number of an optional active-low sounder output
    pub inverted_sounder_pin: Option<u32>,
}

impl Default for TelegraphConfig {
    fn default() -> Self {
        Self {
            channel: "lobby".to_string(),
            server: "morse.autodidacts.io".to_string(),
            port: "8000".to_string(),
            gpio: true,
            key_pin: 7,
            sounder_pin: 10,
            inverted_sounder_pin: None,
        }
    }
}

impl TelegraphConfig {
    /// Load from `path`, falling back to the defaults on any failure
    pub fn load(path: &Path) -> Self {
        let config = match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                component_warn!(
                    Component::Config,
                    "Error reading {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        };

        component_info!(Component::Config, "configuration: {:?}", config);
        config
    }

    pub fn from_file(path: &Path) -> TelegraphResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> TelegraphResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| TelegraphError::Config {
            message: e.to_string(),
        })?;
        config.validate().map_err(|e| TelegraphError::Config {
            message: e.to_string(),
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SharedError> {
        let required = [
            ("Channel", &self.channel),
            ("Server", &self.server),
            ("Port", &self.port),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SharedError::InvalidConfig {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.port.parse::<u16>().is_err() {
            return Err(SharedError::InvalidConfig {
                field: "Port".to_string(),
                value: self.port.clone(),
            });
        }
        Ok(())
    }

    /// Websocket address of the configured channel
    pub fn channel_url(&self) -> String {
        channel_url(&self.server, &self.port, &self.channel)
    }

    /// CLI flag first, then `TELEGRAPH_CONFIG_PATH`, then `config.json`
    pub fn resolve_path(cli_path: Option<PathBuf>) -> PathBuf {
        Self::resolve_path_from(cli_path, std::env::var(CONFIG_PATH_ENV).ok())
    }

    pub fn resolve_path_from(cli_path: Option<PathBuf>, env_path: Option<String>) -> PathBuf {
        cli_path
            .or_else(|| env_path.filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
