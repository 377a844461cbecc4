#![forbid(unsafe_code)]

/// Descriptive metadata about a loaded model, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// Human-readable algorithm family, e.g. "XGBoost gbtree".
    pub algorithm: String,
    pub objective: String,
    pub num_trees: usize,
    pub feature_names: Vec<String>,
    /// Gain importance per feature in percent (sums to 100), in schema
    /// order. `None` when the artifact carries no split gains.
    pub importance: Option<Vec<(String, f64)>>,
}

impl ModelSummary {
    pub fn importance_of(&self, feature: &str) -> Option<f64> {
        self.importance
            .as_ref()?
            .iter()
            .find(|(name, _)| name == feature)
            .map(|&(_, pct)| pct)
    }

    /// The feature with the largest importance share.
    pub fn most_important(&self) -> Option<&str> {
        self.importance
            .as_ref()?
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(importance: Option<Vec<(String, f64)>>) -> ModelSummary {
        ModelSummary {
            algorithm: "XGBoost gbtree".into(),
            objective: "reg:squarederror".into(),
            num_trees: 100,
            feature_names: vec!["Porosity".into(), "diffusivity".into()],
            importance,
        }
    }

    #[test]
    fn lookup_and_ranking() {
        let s = summary(Some(vec![
            ("Porosity".into(), 54.66),
            ("diffusivity".into(), 45.34),
        ]));
        assert_eq!(s.importance_of("diffusivity"), Some(45.34));
        assert_eq!(s.most_important(), Some("Porosity"));
    }

    #[test]
    fn absent_importance() {
        let s = summary(None);
        assert_eq!(s.importance_of("Porosity"), None);
        assert_eq!(s.most_important(), None);
    }
}
