#![forbid(unsafe_code)]

//! Named single-row feature records.

use crate::error::InferenceError;

/// One record of named numeric columns, in insertion order.
///
/// ```
/// use bcap_model::FeatureRow;
///
/// let row = FeatureRow::new().with("Porosity", 0.365).with("diffusivity", 9.5e-8);
/// assert_eq!(row.get("diffusivity"), Some(9.5e-8));
/// let schema = ["diffusivity".to_string(), "Porosity".to_string()];
/// assert_eq!(row.align(&schema)?, vec![9.5e-8, 0.365]);
/// # Ok::<(), bcap_model::InferenceError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(String, f64)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    pub fn columns(&self) -> &[(String, f64)] {
        &self.columns
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|&(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reorder the row's values into `schema` order.
    ///
    /// Every schema column must be present exactly once and the row may not
    /// carry columns the schema does not know.
    pub fn align(&self, schema: &[String]) -> Result<Vec<f64>, InferenceError> {
        for (i, (name, _)) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|(seen, _)| seen == name) {
                return Err(InferenceError::DuplicateFeature { name: name.clone() });
            }
            if !schema.contains(name) {
                return Err(InferenceError::UnknownFeature { name: name.clone() });
            }
        }
        schema
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| InferenceError::MissingFeature { name: name.clone() })
            })
            .collect()
    }
}
