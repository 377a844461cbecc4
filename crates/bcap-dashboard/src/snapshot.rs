#![forbid(unsafe_code)]

//! Headless rendering of a single interaction.

use bcap_render::Frame;
use bcap_runtime::Model;

use crate::app::{Dashboard, Msg};
use crate::cli::Cli;
use crate::form::FormValues;
use crate::page::ModelStatus;

/// One scripted visit: optionally enter values, optionally press predict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRequest {
    pub width: u16,
    pub height: u16,
    pub porosity: Option<f64>,
    pub diffusivity: Option<f64>,
    pub predict: bool,
}

impl Default for SnapshotRequest {
    fn default() -> Self {
        Self {
            width: 100,
            height: 40,
            porosity: None,
            diffusivity: None,
            predict: false,
        }
    }
}

impl From<&Cli> for SnapshotRequest {
    fn from(cli: &Cli) -> Self {
        Self {
            width: cli.width,
            height: cli.height,
            porosity: cli.porosity,
            diffusivity: cli.diffusivity,
            predict: cli.predict,
        }
    }
}

/// Drive a fresh dashboard through `request` and return the dashboard.
pub fn simulate(status: ModelStatus, locale: &str, request: &SnapshotRequest) -> Dashboard {
    let mut app = Dashboard::new(status, locale);
    if request.porosity.is_some() || request.diffusivity.is_some() {
        let defaults = FormValues::default();
        app.update(Msg::SetValues(FormValues {
            porosity: request.porosity.unwrap_or(defaults.porosity),
            diffusivity: request.diffusivity.unwrap_or(defaults.diffusivity),
        }));
    }
    if request.predict {
        app.update(Msg::Predict);
    }
    app
}

/// Render the page `request` leads to as plain text.
pub fn render_snapshot(status: ModelStatus, locale: &str, request: &SnapshotRequest) -> String {
    let app = simulate(status, locale, request);
    let mut frame = Frame::new(request.width.max(1), request.height.max(1));
    app.view(&mut frame);
    frame.buffer.to_text()
}
