//! Configuration handling for shkit
//!
//! Configuration is read from, in order of precedence:
//! 1. the file named by `$SHKIT_CONFIG`
//! 2. the nearest `.shkit.toml` walking up from the current directory
//! 3. `~/.config/shkit/config.toml` (platform config dir)
//!
//! The first file found wins; missing keys fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::date::DEFAULT_FORMAT;
use crate::domain::Tz;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SHKIT_CONFIG";

/// File name looked up in the current directory and its ancestors
pub const LOCAL_CONFIG_FILE: &str = ".shkit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Date rendering defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DateConfig {
    /// strftime pattern used by `date format`
    pub format: String,

    /// Zone for reading zone-less input and rendering output
    pub timezone: Tz,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            timezone: Tz::Utc,
        }
    }
}

/// How `--expr` callbacks are evaluated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CallbackConfig {
    /// Shell that runs expressions (`<shell> -c <expr>`)
    pub shell: String,

    /// Environment variable holding the current element
    pub var: String,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            var: "it".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    pub date: DateConfig,

    pub callback: CallbackConfig,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.callback.shell.trim().is_empty() {
            return Err(ConfigError::Invalid("callback.shell must not be empty".to_string()));
        }
        if self.callback.var.is_empty()
            || !self
                .callback
                .var
                .chars()
                .all(|c| c == '_' || c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::Invalid(format!(
                "callback.var '{}' is not a valid variable name",
                self.callback.var
            )));
        }
        Ok(())
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shkit", "shkit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Finds the config file that [`Config::load`] would read
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        if let Some(path) = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_local(&dir))
        {
            return Some(path);
        }

        Self::global_config_dir()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Finds the nearest `.shkit.toml` at or above `start`
    pub fn find_local(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(LOCAL_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Writes the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
