#![forbid(unsafe_code)]

//! Diagnostic logging.
//!
//! The full-screen UI owns the terminal, so log output only ever goes to a
//! file. Without `log_file` no subscriber is installed and every `tracing`
//! event is discarded.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;
use crate::config::Config;
use crate::error::AppError;

pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

pub fn parse_filter(filter: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(filter).map_err(|err| AppError::LogFilter {
        filter: filter.to_string(),
        message: err.to_string(),
    })
}

pub fn open_log_file(path: &Path) -> Result<File, AppError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// A subscriber writing `format` lines that pass `filter` to `file`.
pub fn build_subscriber(
    filter: &str,
    format: LogFormat,
    file: File,
) -> Result<BoxedSubscriber, AppError> {
    let filter = parse_filter(filter)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);
    Ok(match format {
        LogFormat::Text => Box::new(builder.finish()),
        LogFormat::Json => Box::new(builder.json().finish()),
    })
}

/// Install the global subscriber described by `config`.
///
/// Returns whether one was installed.
pub fn init(config: &Config) -> Result<bool, AppError> {
    let Some(path) = &config.log_file else {
        // Still validate the filter so a typo is reported once a file is set.
        parse_filter(&config.log_filter)?;
        return Ok(false);
    };
    let file = open_log_file(path)?;
    let subscriber = build_subscriber(&config.log_filter, config.log_format, file)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|_| AppError::LoggingInstalled)?;
    tracing::debug!(
        locale = %config.locale,
        model_path = %config.model_path.display(),
        filter = %config.log_filter,
        "configuration resolved"
    );
    Ok(true)
}
