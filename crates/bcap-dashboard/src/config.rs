#![forbid(unsafe_code)]

//! Layered settings.
//!
//! Each key is taken from the first layer that sets it:
//!
//! 1. command line flags
//! 2. environment (`BCAP_MODEL_PATH`, `BCAP_LOCALE`, `BCAP_LOG`, `BCAP_LOG_FILE`)
//! 3. the TOML file named by `--config`
//! 4. built-in defaults
//!
//! ```toml
//! # battery-capacity.toml
//! model_path = "models/battery_model.json"
//! locale = "ko"
//! log_filter = "bcap_model=debug,info"
//! log_file = "battery-capacity.log"
//! log_format = "json"
//! ```

use std::path::{Path, PathBuf};

use bcap_model::DEFAULT_MODEL_PATH;
use serde::Deserialize;

use crate::cli::{Cli, LogFormat};
use crate::error::ConfigError;

pub const ENV_MODEL_PATH: &str = "BCAP_MODEL_PATH";
pub const ENV_LOCALE: &str = "BCAP_LOCALE";
pub const ENV_LOG: &str = "BCAP_LOG";
pub const ENV_LOG_FILE: &str = "BCAP_LOG_FILE";

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// The optional file layer. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub model_path: Option<PathBuf>,
    pub locale: Option<String>,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
}

impl FileConfig {
    pub fn from_toml_str(path: &Path, s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &content)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model_path: PathBuf,
    pub locale: String,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            locale: DEFAULT_LOCALE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Resolve from the process environment.
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolve with `env` standing in for the environment.
    ///
    /// Empty environment values count as unset.
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_toml_file(path)?,
            None => FileConfig::default(),
        };
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let locale = cli
            .locale
            .clone()
            .or_else(|| lookup(ENV_LOCALE))
            .or(file.locale)
            .unwrap_or(defaults.locale);
        let locale = normalize_locale(&locale)?;

        let config = Self {
            model_path: cli
                .model_path
                .clone()
                .or_else(|| lookup(ENV_MODEL_PATH).map(PathBuf::from))
                .or(file.model_path)
                .unwrap_or(defaults.model_path),
            locale,
            log_filter: cli
                .log_filter
                .clone()
                .or_else(|| lookup(ENV_LOG))
                .or(file.log_filter)
                .unwrap_or(defaults.log_filter),
            log_file: cli
                .log_file
                .clone()
                .or_else(|| lookup(ENV_LOG_FILE).map(PathBuf::from))
                .or(file.log_file),
            log_format: cli.log_format.or(file.log_format).unwrap_or(defaults.log_format),
        };
        Ok(config)
    }
}

/// Trim and lowercase a locale tag, rejecting anything that is not a
/// plausible BCP 47 shape.
fn normalize_locale(raw: &str) -> Result<String, ConfigError> {
    let tag = raw.trim().to_ascii_lowercase();
    let plausible = !tag.is_empty()
        && tag
            .split(['-', '_'])
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if plausible {
        Ok(tag)
    } else {
        Err(ConfigError::InvalidValue {
            key: "locale",
            value: raw.to_string(),
        })
    }
}
