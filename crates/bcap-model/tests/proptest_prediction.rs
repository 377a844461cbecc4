//! Property-based invariants for prediction over the form's input domain.
//!
//! 1. Every in-range input yields a finite value or an error, never a panic
//! 2. Predictions stay within base score ± the sum of extreme leaves
//! 3. Row column order never changes the result

use std::path::PathBuf;

use bcap_model::{FeatureRow, Regressor, XgbRegressor, load_model};
use proptest::prelude::*;

fn model() -> XgbRegressor {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/battery_model.json");
    load_model(&path, &["Porosity", "diffusivity"]).expect("fixture loads")
}

proptest! {
    #[test]
    fn in_range_inputs_predict_finite(porosity in 0.0f64..=1.0, diffusivity in 1e-9f64..=1e-6) {
        let model = model();
        let row = FeatureRow::new().with("Porosity", porosity).with("diffusivity", diffusivity);
        let value = model.predict_one(&row).expect("prediction");
        prop_assert!(value.is_finite());
        prop_assert!((95.0 - 1.5 - 0.25..=95.0 + 1.25 + 0.75).contains(&value));
    }

    #[test]
    fn column_order_is_irrelevant(porosity in 0.0f64..=1.0, diffusivity in 1e-9f64..=1e-6) {
        let model = model();
        let a = FeatureRow::new().with("Porosity", porosity).with("diffusivity", diffusivity);
        let b = FeatureRow::new().with("diffusivity", diffusivity).with("Porosity", porosity);
        prop_assert_eq!(model.predict_one(&a), model.predict_one(&b));
    }

    #[test]
    fn arbitrary_json_never_panics(text in ".{0,200}") {
        let _ = XgbRegressor::from_json_str(&text);
    }
}
