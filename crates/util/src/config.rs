//! Read-only configuration for Quill.
//!
//! The only tunable is the base URL of the completion service. It is resolved
//! from, in order: the `--api-base` command-line value, the `QUILL_API_BASE`
//! environment variable, the `api_base` key of a JSON config file, and finally
//! the local default `http://localhost:3001`.
//!
//! The config file lives at `QUILL_CONFIG_PATH` when set, otherwise at
//! `<config dir>/quill/config.json`. A missing file is normal; an unreadable
//! or unparsable one is logged and skipped so a broken file never blocks the
//! form from opening.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config_file_path, expand_tilde};

/// Environment variable overriding the completion service base URL.
pub const API_BASE_ENV: &str = "QUILL_API_BASE";

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "QUILL_CONFIG_PATH";

/// Default filename for the JSON config.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:3001";

/// Error surfaced when reading the config file fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions).
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Contents of the optional JSON config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_base: Option<String>,
}

/// Where the resolved base URL came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    File(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CommandLine => f.write_str("--api-base"),
            ConfigSource::Environment => f.write_str(API_BASE_ENV),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Default => f.write_str("default"),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuillConfig {
    /// Base URL of the completion service, not yet validated.
    pub api_base: String,
    pub source: ConfigSource,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            source: ConfigSource::Default,
        }
    }
}

impl QuillConfig {
    /// Resolve configuration from the command line, environment and config file.
    pub fn resolve(cli_api_base: Option<&str>) -> Self {
        if let Some(value) = non_blank(cli_api_base) {
            return Self::from_source(value, ConfigSource::CommandLine);
        }

        if let Ok(value) = env::var(API_BASE_ENV)
            && let Some(value) = non_blank(Some(&value))
        {
            return Self::from_source(value, ConfigSource::Environment);
        }

        let path = default_config_path();
        match load_config_file(&path) {
            Ok(Some(file)) => {
                if let Some(value) = non_blank(file.api_base.as_deref()) {
                    return Self::from_source(value, ConfigSource::File(path));
                }
            }
            Ok(None) => debug!(path = %path.display(), "No config file found"),
            Err(error) => warn!(
                path = %path.display(),
                error = %error,
                "Failed to read config file; using defaults"
            ),
        }

        Self::default()
    }

    fn from_source(api_base: &str, source: ConfigSource) -> Self {
        Self {
            api_base: api_base.to_string(),
            source,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Config file location honoring `QUILL_CONFIG_PATH`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    config_file_path(CONFIG_FILE_NAME)
}

/// Read the config file, returning `Ok(None)` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(ConfigError::Io(error)),
    }
}
