#![forbid(unsafe_code)]

//! Model loading and inference for the battery capacity dashboard.
//!
//! # Role in the dashboard
//! `bcap-model` turns a saved XGBoost JSON artifact into a validated,
//! read-only [`Regressor`]. The dashboard builds a [`FeatureRow`] from the
//! form, asks the regressor for one value, and renders it. Everything that
//! can go wrong while loading is a [`LoadError`]; everything that can go
//! wrong for a single row is an [`InferenceError`].
//!
//! The handle is loaded at most once per process through [`ModelCache`].

pub mod cache;
pub mod error;
pub mod loader;
pub mod regressor;
pub mod row;
pub mod summary;
pub mod xgboost;

pub use cache::{ModelCache, SharedRegressor};
pub use error::{InferenceError, LoadError};
pub use loader::{DEFAULT_MODEL_PATH, load_model};
pub use regressor::Regressor;
pub use row::FeatureRow;
pub use summary::ModelSummary;
pub use xgboost::{Link, XgbRegressor};
