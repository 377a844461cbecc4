#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Why a model artifact could not be turned into a usable regressor.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} could not be found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {message}")]
    Invalid { message: String },

    #[error("unsupported model: {message}")]
    Unsupported { message: String },
}

impl LoadError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// True when the artifact is simply absent, as opposed to unreadable or
    /// malformed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Why a single prediction could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("missing feature column: {name}")]
    MissingFeature { name: String },

    #[error("feature column not in model schema: {name}")]
    UnknownFeature { name: String },

    #[error("duplicate feature column: {name}")]
    DuplicateFeature { name: String },

    #[error("model produced a non-finite prediction: {value}")]
    NonFinite { value: f64 },

    #[error("no prediction rows")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_path() {
        let error = LoadError::NotFound {
            path: PathBuf::from("battery_model.json"),
        };
        assert_eq!(error.to_string(), "battery_model.json could not be found");
        assert!(error.is_not_found());
    }

    #[test]
    fn invalid_constructor_formats_message() {
        let error = LoadError::invalid("tree 3: child index out of range");
        assert_eq!(
            error.to_string(),
            "invalid model: tree 3: child index out of range"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn inference_error_messages() {
        let error = InferenceError::MissingFeature {
            name: "Porosity".into(),
        };
        assert_eq!(error.to_string(), "missing feature column: Porosity");
    }
}
