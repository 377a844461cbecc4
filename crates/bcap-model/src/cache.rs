#![forbid(unsafe_code)]

//! Process-wide, load-once model handle.
//!
//! Only a successful load is cached. A failed load is returned to the
//! caller and nothing is stored, but callers are expected to treat the
//! failure as final for the session rather than retry.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::LoadError;
use crate::loader::load_model;
use crate::regressor::Regressor;

pub type SharedRegressor = Arc<dyn Regressor>;

#[derive(Default)]
pub struct ModelCache {
    cell: OnceLock<SharedRegressor>,
}

impl ModelCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The cached model, if one has been loaded.
    pub fn get(&self) -> Option<SharedRegressor> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached model or run `init` to produce one.
    ///
    /// If two threads race, both may run `init`; the first value stored wins
    /// and is returned to both.
    pub fn get_or_try_init(
        &self,
        init: impl FnOnce() -> Result<SharedRegressor, LoadError>,
    ) -> Result<SharedRegressor, LoadError> {
        if let Some(model) = self.cell.get() {
            return Ok(Arc::clone(model));
        }
        let model = init()?;
        Ok(Arc::clone(self.cell.get_or_init(|| model)))
    }

    /// Load the XGBoost artifact at `path` on first use.
    pub fn get_or_load(&self, path: &Path, schema: &[&str]) -> Result<SharedRegressor, LoadError> {
        self.get_or_try_init(|| {
            load_model(path, schema).map(|model| Arc::new(model) as SharedRegressor)
        })
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// The cache shared by the whole process.
pub fn global() -> &'static ModelCache {
    static CACHE: ModelCache = ModelCache::new();
    &CACHE
}
