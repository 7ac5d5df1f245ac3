//! Backend base-URL resolution and persistence.
//!
//! Resolution order: `API_BASE` environment variable, then the persisted
//! config file under the platform config directory, then the built-in
//! default. Trailing slashes are stripped everywhere.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const API_BASE_ENV: &str = "API_BASE";
const CONFIG_FILE: &str = "client.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBase { url: String, reason: String },
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Malformed(String),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = Self::read_file(config_file().as_deref());
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config.api_base = base;
            }
        }
        config.api_base = normalize_base(&config.api_base);
        config
    }

    fn read_file(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Validate and apply a new base URL without touching disk.
    pub fn set_api_base(&mut self, base: &str) -> Result<(), ConfigError> {
        let normalized = normalize_base(base.trim());
        Url::parse(&normalized).map_err(|e| ConfigError::InvalidBase {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        self.api_base = normalized;
        Ok(())
    }

    /// Write the current values to the platform config file.
    pub fn persist(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file().ok_or(ConfigError::NoConfigDir)?;
        self.write_file(&path)?;
        Ok(path)
    }

    fn write_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let raw = toml::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        fs::write(path, raw)?;
        Ok(())
    }
}

fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "univia", "univia-client")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
