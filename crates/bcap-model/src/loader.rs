#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use crate::error::LoadError;
use crate::regressor::Regressor;
use crate::xgboost::XgbRegressor;

/// Artifact file name used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "battery_model.json";

/// Read, parse and validate the model at `path`.
///
/// `schema` names the features of artifacts saved without feature names.
/// A non-empty `schema` must also match the artifact's own feature names,
/// in any order. An empty `schema` accepts whatever names the artifact has.
pub fn load_model(path: &Path, schema: &[&str]) -> Result<XgbRegressor, LoadError> {
    let started = Instant::now();
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let model = XgbRegressor::from_json_str(&text)?.with_default_feature_names(schema)?;
    check_schema(model.feature_names(), schema)?;
    tracing::info!(
        path = %path.display(),
        trees = model.num_trees(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "model loaded"
    );
    Ok(model)
}

fn check_schema(features: &[String], schema: &[&str]) -> Result<(), LoadError> {
    if schema.is_empty() {
        return Ok(());
    }
    let matches = features.len() == schema.len()
        && schema.iter().all(|name| features.iter().any(|f| f == name));
    if matches {
        Ok(())
    } else {
        Err(LoadError::invalid(format!(
            "model features {features:?} do not match expected {schema:?}"
        )))
    }
}
