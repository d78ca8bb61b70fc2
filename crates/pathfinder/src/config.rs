//! Configuration management for Pathfinder
//!
//! Settings are layered: built-in defaults, then the YAML config file, then
//! environment variables and command line flags (clap resolves those two
//! before they reach [`Settings::apply_overrides`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_DIR_NAME: &str = "pathfinder";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Invalid config file {path}: {source}")]
  Parse { path: PathBuf, source: serde_yaml::Error },

  #[error("Invalid service URL '{url}': {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("Timeout must be at least one second")]
  ZeroTimeout,
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
  /// Base URL of the recommendation service
  #[serde(default = "default_api_url")]
  pub api_url: String,
  /// Per-request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Colored terminal output
  #[serde(default = "default_color")]
  pub color: bool,
}

fn default_api_url() -> String {
  DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
  DEFAULT_TIMEOUT_SECS
}
fn default_color() -> bool {
  true
}

impl Default for Settings {
  fn default() -> Self {
    Self { api_url: default_api_url(), timeout_secs: default_timeout_secs(), color: default_color() }
  }
}

/// Values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub api_url: Option<String>,
  pub timeout_secs: Option<u64>,
  pub no_color: bool,
}

/// Default config location, e.g. `~/.config/pathfinder/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Settings {
  /// Load settings from a YAML file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

    if content.trim().is_empty() {
      return Ok(Self::default());
    }

    serde_yaml::from_str(&content)
      .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
  }

  /// Load from an explicit path, or the default location when it exists
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    match default_config_path() {
      Some(path) if path.exists() => {
        tracing::debug!(path = %path.display(), "loading config file");
        Self::load_from_file(path)
      }
      _ => Ok(Self::default()),
    }
  }

  pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
    if let Some(api_url) = overrides.api_url {
      self.api_url = api_url;
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
      self.timeout_secs = timeout_secs;
    }
    if overrides.no_color {
      self.color = false;
    }
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let parsed = Url::parse(&self.api_url)
      .map_err(|e| ConfigError::InvalidUrl { url: self.api_url.clone(), reason: e.to_string() })?;

    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(ConfigError::InvalidUrl {
        url: self.api_url.clone(),
        reason: format!("unsupported scheme '{}'", parsed.scheme()),
      });
    }

    if self.timeout_secs == 0 {
      return Err(ConfigError::ZeroTimeout);
    }

    Ok(())
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig { base_url: self.api_url.clone(), timeout_secs: self.timeout_secs }
  }
}
