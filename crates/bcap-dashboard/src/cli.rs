#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// Log line encoding for the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "battery-capacity",
    about = "Predict battery capacity from electrode porosity and effective diffusivity",
    version
)]
pub struct Cli {
    /// TOML file with default settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Saved XGBoost JSON model [env: BCAP_MODEL_PATH].
    #[arg(long, value_name = "PATH")]
    pub model_path: Option<PathBuf>,

    /// UI language, `en` or `ko` [env: BCAP_LOCALE].
    #[arg(long)]
    pub locale: Option<String>,

    /// tracing filter directives [env: BCAP_LOG].
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Write logs to this file; logging is off without it [env: BCAP_LOG_FILE].
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Render one frame to stdout and exit.
    #[arg(long)]
    pub snapshot: bool,

    /// Snapshot width in columns.
    #[arg(long, default_value_t = 100)]
    pub width: u16,

    #[arg(long, default_value_t = 40)]
    pub height: u16,

    /// Porosity entered before the snapshot is taken.
    #[arg(long, requires = "snapshot")]
    pub porosity: Option<f64>,

    /// Effective diffusivity entered before the snapshot is taken.
    #[arg(long, requires = "snapshot")]
    pub diffusivity: Option<f64>,

    /// Press the predict button before the snapshot is taken.
    #[arg(long, requires = "snapshot")]
    pub predict: bool,
}
