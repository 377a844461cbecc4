#![forbid(unsafe_code)]

//! Battery capacity dashboard.
//!
//! # Role in the workspace
//! `bcap-dashboard` wires everything together: it resolves settings,
//! installs logging, loads the model once through the process-wide cache,
//! and runs the dashboard either full screen or as a one-frame snapshot.
//!
//! The page itself is [`page::describe_page`], a pure function of the model
//! status, the form values, and whether the predict button was pressed.

pub mod app;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod form;
pub mod logging;
pub mod page;
pub mod snapshot;
pub mod view;

use std::io::Write;
use std::path::Path;

use bcap_runtime::{Program, ProgramConfig};
use clap::Parser;

use crate::app::Dashboard;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::form::SCHEMA;
use crate::page::ModelStatus;
use crate::snapshot::{SnapshotRequest, render_snapshot};

/// Load the model through the process-wide cache.
pub fn load_status(path: &Path) -> ModelStatus {
    ModelStatus::from_load(path, bcap_model::cache::global().get_or_load(path, &SCHEMA))
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env(&cli)?;
    logging::init(&config)?;
    let status = load_status(&config.model_path);

    if cli.snapshot {
        let text = render_snapshot(status, &config.locale, &SnapshotRequest::from(&cli));
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
        return Ok(());
    }

    let mut program = Program::fullscreen(
        Dashboard::new(status, config.locale),
        ProgramConfig::default(),
    )?;
    program.run()?;
    Ok(())
}
