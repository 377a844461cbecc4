#![forbid(unsafe_code)]

use std::slice;

use crate::error::InferenceError;
use crate::row::FeatureRow;
use crate::summary::ModelSummary;

/// A loaded model that maps named feature rows to one scalar each.
///
/// The dashboard depends only on this trait, so tests can substitute a
/// stub for a real artifact.
pub trait Regressor: Send + Sync {
    /// Column names the model expects, in its own order.
    fn feature_names(&self) -> &[String];

    /// One output per input row, in row order.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError>;

    fn describe(&self) -> ModelSummary;

    /// Predict a single row and take the first output.
    fn predict_one(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let outputs = self.predict(slice::from_ref(row))?;
        let value = outputs.first().copied().ok_or(InferenceError::Empty)?;
        if !value.is_finite() {
            return Err(InferenceError::NonFinite { value });
        }
        Ok(value)
    }
}
