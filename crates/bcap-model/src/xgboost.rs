#![forbid(unsafe_code)]

//! XGBoost JSON tree ensembles.
//!
//! Reads the document written by `Booster.save_model("*.json")`, validates
//! it once, and compiles every tree into a flat node array. Prediction is a
//! plain walk from the root of each tree:
//!
//! ```text
//! margin = base_margin + Σ weight[t] × leaf(tree[t], x)
//! output = margin            (identity link)
//!        = exp(margin)       (log link)
//! ```
//!
//! At a split, a missing value (NaN) follows the node's default direction;
//! otherwise `x[f] < threshold` goes left. Values and thresholds are
//! compared in single precision, matching how the trainer stores them.
//!
//! Only numerical splits and single-target models are accepted.

use serde::Deserialize;

use crate::error::{InferenceError, LoadError};
use crate::regressor::Regressor;
use crate::row::FeatureRow;
use crate::summary::ModelSummary;

// ── Document schema ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDoc,
}

#[derive(Debug, Deserialize)]
struct LearnerDoc {
    #[serde(default)]
    feature_names: Vec<String>,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDoc,
    gradient_booster: BoosterDoc,
}

/// XGBoost writes every scalar parameter as a string.
#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    num_feature: String,
    #[serde(default)]
    num_target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDoc {
    name: String,
}

#[derive(Debug, Deserialize)]
struct BoosterDoc {
    name: String,
    /// Present for `gbtree`.
    #[serde(default)]
    model: Option<ForestDoc>,
    /// Present for `dart`, which wraps a `gbtree`.
    #[serde(default)]
    gbtree: Option<Box<BoosterDoc>>,
    /// Per-tree weights for `dart`.
    #[serde(default)]
    weight_drop: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ForestDoc {
    trees: Vec<TreeDoc>,
}

#[derive(Debug, Deserialize)]
struct TreeDoc {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    default_left: Vec<Flag>,
    #[serde(default)]
    loss_changes: Vec<f64>,
    #[serde(default)]
    split_type: Vec<i64>,
}

/// Older writers emit `0`/`1`, newer ones `true`/`false`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(i) => i != 0,
        }
    }
}

// ── Compiled model ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f32,
        default_left: bool,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn leaf_value(&self, x: &[f32]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    default_left,
                    left,
                    right,
                } => {
                    let v = x[feature];
                    let go_left = if v.is_nan() { default_left } else { v < threshold };
                    index = if go_left { left } else { right };
                }
            }
        }
    }
}

/// How the summed margin maps to the reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Identity,
    Log,
}

impl Link {
    pub fn for_objective(name: &str) -> Result<Self, LoadError> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:quantileerror" => Ok(Self::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Self::Log),
            other => Err(LoadError::unsupported(format!("objective `{other}`"))),
        }
    }
}

/// A validated XGBoost regression forest.
#[derive(Debug, Clone)]
pub struct XgbRegressor {
    feature_names: Vec<String>,
    num_feature: usize,
    objective: String,
    booster: String,
    link: Link,
    base_margin: f64,
    trees: Vec<Tree>,
    tree_weights: Vec<f64>,
    importance: Option<Vec<f64>>,
}

impl XgbRegressor {
    /// Parse and validate a model document.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let doc: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    fn from_document(doc: ModelDocument) -> Result<Self, LoadError> {
        let learner = doc.learner;
        let param = learner.learner_model_param;

        let num_feature: usize = param
            .num_feature
            .trim()
            .parse()
            .map_err(|_| LoadError::invalid(format!("num_feature `{}`", param.num_feature)))?;
        if num_feature == 0 {
            return Err(LoadError::invalid("num_feature is 0"));
        }
        if let Some(targets) = param.num_target.as_deref() {
            if targets.trim() != "1" && targets.trim() != "0" {
                return Err(LoadError::unsupported(format!("{targets} targets")));
            }
        }
        if !learner.feature_names.is_empty() && learner.feature_names.len() != num_feature {
            return Err(LoadError::invalid(format!(
                "{} feature names for {num_feature} features",
                learner.feature_names.len()
            )));
        }

        let objective = learner.objective.name;
        let link = Link::for_objective(&objective)?;
        let base_score = parse_base_score(&param.base_score)?;
        let base_margin = match link {
            Link::Identity => base_score,
            Link::Log if base_score > 0.0 => base_score.ln(),
            Link::Log => {
                return Err(LoadError::invalid(format!(
                    "base_score {base_score} must be positive for `{objective}`"
                )));
            }
        };

        let booster = learner.gradient_booster;
        let (booster_name, forest, weights) = match booster.name.as_str() {
            "gbtree" => (booster.name.clone(), booster.model, None),
            "dart" => {
                let inner = booster
                    .gbtree
                    .ok_or_else(|| LoadError::invalid("dart booster without gbtree"))?;
                (booster.name.clone(), inner.model, Some(booster.weight_drop))
            }
            other => return Err(LoadError::unsupported(format!("booster `{other}`"))),
        };
        let forest = forest.ok_or_else(|| LoadError::invalid("booster has no model"))?;

        let tree_weights = match weights {
            Some(w) if w.len() == forest.trees.len() => w,
            Some(w) => {
                return Err(LoadError::invalid(format!(
                    "{} dart weights for {} trees",
                    w.len(),
                    forest.trees.len()
                )));
            }
            None => vec![1.0; forest.trees.len()],
        };

        let importance = gain_importance(&forest.trees, num_feature);
        let trees = forest
            .trees
            .iter()
            .enumerate()
            .map(|(t, tree)| {
                compile_tree(tree, num_feature)
                    .map_err(|message| LoadError::invalid(format!("tree {t}: {message}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            feature_names: learner.feature_names,
            num_feature,
            objective,
            booster: booster_name,
            link,
            base_margin,
            trees,
            tree_weights,
            importance,
        })
    }

    /// Name the features when the artifact did not record them.
    ///
    /// Artifacts that already carry names keep them.
    pub fn with_default_feature_names(mut self, names: &[&str]) -> Result<Self, LoadError> {
        if self.feature_names.is_empty() {
            if names.len() != self.num_feature {
                return Err(LoadError::invalid(format!(
                    "model has {} unnamed features, expected {}",
                    self.num_feature,
                    names.len()
                )));
            }
            self.feature_names = names.iter().map(|n| n.to_string()).collect();
        }
        Ok(self)
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn num_feature(&self) -> usize {
        self.num_feature
    }

    pub fn link(&self) -> Link {
        self.link
    }

    /// Predict one row already in model feature order.
    pub fn predict_values(&self, x: &[f64]) -> f64 {
        let x: Vec<f32> = x.iter().map(|&v| v as f32).collect();
        let margin = self
            .trees
            .iter()
            .zip(&self.tree_weights)
            .fold(self.base_margin, |acc, (tree, w)| acc + w * tree.leaf_value(&x));
        match self.link {
            Link::Identity => margin,
            Link::Log => margin.exp(),
        }
    }
}

impl Regressor for XgbRegressor {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        rows.iter()
            .map(|row| {
                let values = row.align(&self.feature_names)?;
                let value = self.predict_values(&values);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(InferenceError::NonFinite { value })
                }
            })
            .collect()
    }

    fn describe(&self) -> ModelSummary {
        ModelSummary {
            algorithm: format!("XGBoost {}", self.booster),
            objective: self.objective.clone(),
            num_trees: self.trees.len(),
            feature_names: self.feature_names.clone(),
            importance: self.importance.as_ref().map(|shares| {
                self.feature_names
                    .iter()
                    .cloned()
                    .zip(shares.iter().copied())
                    .collect()
            }),
        }
    }
}

/// `"9.5E1"` or the vector form `"[9.5E1]"`.
fn parse_base_score(raw: &str) -> Result<f64, LoadError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let first = inner.split(',').next().unwrap_or_default().trim();
    match first.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::invalid(format!("base_score `{raw}`"))),
    }
}

fn compile_tree(doc: &TreeDoc, num_feature: usize) -> Result<Tree, String> {
    let n = doc.left_children.len();
    if n == 0 {
        return Err("no nodes".into());
    }
    let lengths = [
        ("right_children", doc.right_children.len()),
        ("split_indices", doc.split_indices.len()),
        ("split_conditions", doc.split_conditions.len()),
        ("default_left", doc.default_left.len()),
    ];
    for (field, len) in lengths {
        if len != n {
            return Err(format!("{field} has {len} entries, expected {n}"));
        }
    }
    for (field, len) in [
        ("loss_changes", doc.loss_changes.len()),
        ("split_type", doc.split_type.len()),
    ] {
        if len != 0 && len != n {
            return Err(format!("{field} has {len} entries, expected {n}"));
        }
    }

    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        let (left, right) = (doc.left_children[i], doc.right_children[i]);
        if left == -1 {
            if right != -1 {
                return Err(format!("node {i} has only a right child"));
            }
            nodes.push(Node::Leaf {
                value: doc.split_conditions[i],
            });
            continue;
        }

        // Children after their parent means every walk terminates.
        let child = |c: i64| -> Result<usize, String> {
            usize::try_from(c)
                .ok()
                .filter(|&c| c > i && c < n)
                .ok_or_else(|| format!("node {i} has child index {c} out of range"))
        };
        let (left, right) = (child(left)?, child(right)?);

        if doc.split_type.get(i).is_some_and(|&t| t != 0) {
            return Err(format!("node {i} is a categorical split"));
        }
        let feature = usize::try_from(doc.split_indices[i])
            .ok()
            .filter(|&f| f < num_feature)
            .ok_or_else(|| format!("node {i} splits on feature {}", doc.split_indices[i]))?;

        nodes.push(Node::Split {
            feature,
            threshold: doc.split_conditions[i] as f32,
            default_left: doc.default_left[i].is_set(),
            left,
            right,
        });
    }
    Ok(Tree { nodes })
}

/// Average gain per split for each feature, normalized to percent.
fn gain_importance(trees: &[TreeDoc], num_feature: usize) -> Option<Vec<f64>> {
    let mut total = vec![0.0; num_feature];
    let mut count = vec![0usize; num_feature];
    for tree in trees {
        if tree.loss_changes.len() != tree.left_children.len() {
            return None;
        }
        for (i, &left) in tree.left_children.iter().enumerate() {
            if left == -1 {
                continue;
            }
            let feature = usize::try_from(*tree.split_indices.get(i)?).ok()?;
            if feature >= num_feature {
                return None;
            }
            total[feature] += tree.loss_changes[i];
            count[feature] += 1;
        }
    }

    let averages: Vec<f64> = total
        .iter()
        .zip(&count)
        .map(|(&t, &c)| if c == 0 { 0.0 } else { t / c as f64 })
        .collect();
    let sum: f64 = averages.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        return None;
    }
    Some(averages.iter().map(|a| a / sum * 100.0).collect())
}
