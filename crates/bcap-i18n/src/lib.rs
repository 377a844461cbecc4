#![forbid(unsafe_code)]

//! Localization for the battery capacity dashboard.
//!
//! Provides externalized string storage with key-based lookup, locale
//! fallback chains, and `{name}` variable interpolation.
//!
//! The catalog does not depend on rendering or runtime, so page
//! descriptions can be resolved to text and tested without a terminal.

pub mod catalog;

pub use catalog::{CoverageReport, LocaleCoverage, LocaleStrings, StringCatalog};
