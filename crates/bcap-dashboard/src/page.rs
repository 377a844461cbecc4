#![forbid(unsafe_code)]

//! What the page shows, independent of how it is drawn.
//!
//! [`describe_page`] is a pure function of the model status, the committed
//! form values, and whether the predict button caused this pass. The view
//! renders its output; tests assert on it directly.

use std::path::Path;

use bcap_model::{InferenceError, LoadError, ModelSummary, Regressor, SharedRegressor};
use bcap_widgets::notice::NoticeKind;

use crate::content::{DOCUMENTED_IMPORTANCE, EXAMPLE_ROWS, MATERIALS, Strings, keys};
use crate::form::{DIFFUSIVITY, FieldSpec, FormValues, POROSITY};

/// Why the model is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Corrupt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub path: String,
    pub detail: String,
}

/// Outcome of the one-time model load.
#[derive(Clone)]
pub enum ModelStatus {
    Ready(SharedRegressor),
    Unavailable(LoadFailure),
}

impl ModelStatus {
    pub fn from_load(path: &Path, result: Result<SharedRegressor, LoadError>) -> Self {
        match result {
            Ok(model) => Self::Ready(model),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "model unavailable");
                let kind = if err.is_not_found() {
                    FailureKind::NotFound
                } else {
                    FailureKind::Corrupt
                };
                Self::Unavailable(LoadFailure {
                    kind,
                    path: path.display().to_string(),
                    detail: err.to_string(),
                })
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(model) => f
                .debug_tuple("Ready")
                .field(&model.describe().algorithm)
                .finish(),
            Self::Unavailable(failure) => f.debug_tuple("Unavailable").field(failure).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeSpec {
    pub kind: NoticeKind,
    pub message: String,
}

impl NoticeSpec {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything one render pass shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescription {
    pub title: String,
    pub subtitle: String,
    /// Status callouts under the title, in order.
    pub notices: Vec<NoticeSpec>,
    /// `None` once the model failed to load: nothing below the notices.
    pub body: Option<PageBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageBody {
    pub sidebar: Sidebar,
    pub main: MainPanel,
    pub info: InfoPanel,
    pub usage: Section,
    pub model_info: Section,
    pub footer: String,
    pub key_hints: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub header: String,
    pub prompt: String,
    pub fields: [FieldText; 2],
    pub button: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldText {
    pub label: String,
    pub help: String,
    /// Present when the committed value is outside the typical range.
    pub warning: Option<String>,
}

/// The left main column.
#[derive(Debug, Clone, PartialEq)]
pub enum MainPanel {
    /// No prediction this pass: a hint and the example table.
    Example {
        hint: String,
        header: String,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Result {
        header: String,
        capacity_label: String,
        /// e.g. `95.00%`.
        capacity: String,
        inputs_header: String,
        /// (label, formatted value) for porosity then diffusivity.
        echo: [(String, String); 2],
    },
    Failed {
        message: String,
    },
}

/// The right main column: material composition metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub header: String,
    pub metrics: Vec<(String, String)>,
}

/// A collapsible section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    /// Body in the widget markup dialect.
    pub markup: String,
}

/// Run the model on one set of form values.
pub fn predict(model: &dyn Regressor, values: FormValues) -> Result<f64, InferenceError> {
    match model.predict_one(&values.to_row()) {
        Ok(value) => {
            tracing::debug!(
                porosity = values.porosity,
                diffusivity = values.diffusivity,
                value,
                "prediction"
            );
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(
                porosity = values.porosity,
                diffusivity = values.diffusivity,
                error = %err,
                "prediction failed"
            );
            Err(err)
        }
    }
}

pub fn describe_page(
    status: &ModelStatus,
    values: FormValues,
    trigger_fired: bool,
    strings: &Strings<'_>,
) -> PageDescription {
    let title = strings.get(keys::TITLE).to_string();
    let subtitle = strings.get(keys::SUBTITLE).to_string();

    let model = match status {
        ModelStatus::Ready(model) => model,
        ModelStatus::Unavailable(failure) => {
            return PageDescription {
                title,
                subtitle,
                notices: failure_notices(failure, strings),
                body: None,
            };
        }
    };

    let main = if trigger_fired {
        match predict(model.as_ref(), values) {
            Ok(value) => result_panel(value, values, strings),
            Err(err) => MainPanel::Failed {
                message: strings.format(keys::PREDICT_FAILED, &[("error", &err.to_string())]),
            },
        }
    } else {
        example_panel(strings)
    };

    let body = PageBody {
        sidebar: sidebar(values, strings),
        main,
        info: InfoPanel {
            header: strings.get(keys::INFO_HEADER).to_string(),
            metrics: MATERIALS
                .iter()
                .map(|&(key, value)| (strings.get(key).to_string(), value.to_string()))
                .collect(),
        },
        usage: Section {
            title: strings.get(keys::USAGE_TITLE).to_string(),
            markup: strings.get(keys::USAGE_BODY).to_string(),
        },
        model_info: Section {
            title: strings.get(keys::MODEL_INFO_TITLE).to_string(),
            markup: model_info_markup(&model.describe(), strings),
        },
        footer: strings.get(keys::FOOTER).to_string(),
        key_hints: strings.get(keys::KEY_HINTS).to_string(),
    };

    PageDescription {
        title,
        subtitle,
        notices: vec![NoticeSpec::new(
            NoticeKind::Success,
            strings.get(keys::MODEL_LOADED),
        )],
        body: Some(body),
    }
}

fn failure_notices(failure: &LoadFailure, strings: &Strings<'_>) -> Vec<NoticeSpec> {
    let path = failure.path.as_str();
    let (first, second) = match failure.kind {
        FailureKind::NotFound => (
            strings.format(keys::MODEL_NOT_FOUND, &[("path", path)]),
            strings.get(keys::MODEL_NOT_FOUND_HINT).to_string(),
        ),
        FailureKind::Corrupt => (
            strings.format(keys::MODEL_LOAD_FAILED, &[("error", &failure.detail)]),
            strings.format(keys::MODEL_LOAD_FAILED_HINT, &[("path", path)]),
        ),
    };
    vec![
        NoticeSpec::new(NoticeKind::Error, first),
        NoticeSpec::new(NoticeKind::Error, second),
    ]
}

fn sidebar(values: FormValues, strings: &Strings<'_>) -> Sidebar {
    let field = |spec: &FieldSpec| {
        let value = values.get(spec.id);
        let warning = (!spec.is_typical(value)).then(|| {
            strings.format(
                keys::OUT_OF_TYPICAL_RANGE,
                &[
                    ("min", &spec.format(spec.typical.0)),
                    ("max", &spec.format(spec.typical.1)),
                ],
            )
        });
        FieldText {
            label: strings.get(spec.label_key).to_string(),
            help: strings.get(spec.help_key).to_string(),
            warning,
        }
    };
    Sidebar {
        header: strings.get(keys::SIDEBAR_HEADER).to_string(),
        prompt: strings.get(keys::SIDEBAR_PROMPT).to_string(),
        fields: [field(&POROSITY), field(&DIFFUSIVITY)],
        button: strings.get(keys::PREDICT_BUTTON).to_string(),
    }
}

fn result_panel(value: f64, values: FormValues, strings: &Strings<'_>) -> MainPanel {
    MainPanel::Result {
        header: strings.get(keys::RESULT_HEADER).to_string(),
        capacity_label: strings.get(keys::RESULT_CAPACITY).to_string(),
        capacity: format!("{value:.2}%"),
        inputs_header: strings.get(keys::RESULT_INPUTS).to_string(),
        echo: [
            (
                strings.get(keys::RESULT_POROSITY).to_string(),
                POROSITY.format(values.porosity),
            ),
            (
                strings.get(keys::RESULT_DIFFUSIVITY).to_string(),
                DIFFUSIVITY.format(values.diffusivity),
            ),
        ],
    }
}

fn example_panel(strings: &Strings<'_>) -> MainPanel {
    MainPanel::Example {
        hint: strings.get(keys::EXAMPLE_HINT).to_string(),
        header: strings.get(keys::EXAMPLE_HEADER).to_string(),
        columns: vec![
            strings.get(keys::EXAMPLE_COL_CASE).to_string(),
            strings.get(keys::RESULT_POROSITY).to_string(),
            strings.get(keys::RESULT_DIFFUSIVITY).to_string(),
            strings.get(keys::EXAMPLE_COL_RANGE).to_string(),
        ],
        rows: EXAMPLE_ROWS
            .iter()
            .map(|&(key, porosity, diffusivity, range)| {
                vec![
                    strings.get(key).to_string(),
                    porosity.to_string(),
                    diffusivity.to_string(),
                    range.to_string(),
                ]
            })
            .collect(),
    }
}

/// Display name of a model column.
fn feature_label<'a>(column: &'a str, strings: &Strings<'a>) -> &'a str {
    match column {
        "Porosity" => "Porosity",
        "diffusivity" => strings.get(keys::DIFFUSIVITY_LABEL).split(" (").next().unwrap_or(column),
        other => other,
    }
}

fn model_info_markup(summary: &ModelSummary, strings: &Strings<'_>) -> String {
    let trees = summary.num_trees.to_string();
    let algorithm = strings.format(
        keys::MODEL_INFO_ALGORITHM,
        &[("algorithm", &summary.algorithm), ("trees", &trees)],
    );

    let documented;
    let summary = if summary.importance.is_some() {
        summary
    } else {
        documented = ModelSummary {
            importance: Some(
                DOCUMENTED_IMPORTANCE
                    .iter()
                    .map(|&(name, pct)| (name.to_string(), pct))
                    .collect(),
            ),
            ..summary.clone()
        };
        &documented
    };
    let shares = summary.importance.as_deref().unwrap_or_default();
    let top = summary.most_important();

    let mut lines = vec![algorithm, String::new(), strings.get(keys::MODEL_INFO_IMPORTANCE).to_string()];
    for (name, pct) in shares {
        let key = if top == Some(name.as_str()) {
            keys::MODEL_INFO_IMPORTANCE_TOP
        } else {
            keys::MODEL_INFO_IMPORTANCE_ITEM
        };
        let percent = format!("{pct:.2}");
        lines.push(strings.format(
            key,
            &[("feature", feature_label(name, strings)), ("percent", &percent)],
        ));
    }
    lines.push(String::new());
    lines.push(strings.get(keys::MODEL_INFO_TRAINING).to_string());
    lines.join("\n")
}
