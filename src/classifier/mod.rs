//! Decision Tree Classifier
//!
//! Estimator wrapping a single tree: validates data at the fit and predict
//! boundaries, keeps the hyperparameters and the labels seen during fitting.
pub mod config;

// private modules
mod setters;

use crate::classifier::config::{ModelIO, TreeConfig};
use crate::data::Matrix;
use crate::errors::TreeError;
use crate::tree::tree::Tree;
use crate::utils::validate_finite;
use hashbrown::HashMap;
use log::info;
use serde::{Deserialize, Serialize};

type ImportanceFn = fn(&Tree, &mut HashMap<usize, (f64, usize)>);

/// Method to calculate variable importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ImportanceMethod {
    /// The number of times a feature is used to split the data.
    Weight,
    /// The average information gain across all splits the feature is used in.
    Gain,
    /// The total information gain across all splits the feature is used in.
    TotalGain,
    /// The average number of training rows across all splits the feature is used in.
    Cover,
    /// The total number of training rows across all splits the feature is used in.
    TotalCover,
}

/// Decision tree classifier grown on information gain.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    cfg: TreeConfig,
    tree: Option<Tree>,
    classes: Vec<usize>,
    n_features_in: Option<usize>,
}

impl ModelIO for DecisionTreeClassifier {}

impl DecisionTreeClassifier {
    /// Decision tree classifier object
    ///
    /// * `max_depth` - Nodes at this depth become leaves.
    /// * `min_samples_split` - Nodes with fewer training rows than this become leaves, at least 1.
    /// * `min_samples_leaf` - Splits leaving fewer training rows than this on either
    ///   side are rejected, at least 1.
    pub fn new(max_depth: usize, min_samples_split: usize, min_samples_leaf: usize) -> Result<Self, TreeError> {
        let cfg = TreeConfig {
            max_depth,
            min_samples_split,
            min_samples_leaf,
        };
        Self::from_config(cfg)
    }

    /// Create an unfitted classifier from a configuration.
    pub fn from_config(cfg: TreeConfig) -> Result<Self, TreeError> {
        cfg.validate()?;
        Ok(DecisionTreeClassifier {
            cfg,
            ..Default::default()
        })
    }

    /// Fit the classifier, replacing any tree from a previous fit.
    ///
    /// * `data` - Dense feature matrix, finite values only.
    /// * `y` - Class labels, one per row of `data`. Any `usize` values are accepted.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[usize]) -> Result<(), TreeError> {
        self.cfg.validate()?;
        if data.rows == 0 || data.cols == 0 {
            return Err(TreeError::EmptyData(data.rows, data.cols));
        }
        if y.len() != data.rows {
            return Err(TreeError::LabelLengthMismatch(data.rows, y.len()));
        }
        validate_finite(data)?;

        let tree = Tree::fit(data, y, &self.cfg)?;
        info!(
            "Fitted tree on {} rows, {} features and {} classes, with depth {} and {} leaves.",
            data.rows,
            data.cols,
            tree.n_classes,
            tree.depth,
            tree.n_leaves
        );

        self.classes = tree.classes.clone();
        self.n_features_in = Some(data.cols);
        self.tree = Some(tree);
        Ok(())
    }

    fn fitted_tree(&self, n_features: usize) -> Result<&Tree, TreeError> {
        let tree = self.tree.as_ref().ok_or(TreeError::NotFitted)?;
        if n_features != tree.n_features {
            return Err(TreeError::ShapeMismatch(tree.n_features, n_features));
        }
        Ok(tree)
    }

    /// Predict a label for every row of `data`, in row order.
    ///
    /// * `data` - Dense feature matrix with as many columns as the training data.
    /// * `parallel` - Predict the rows on the rayon thread pool.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<usize>, TreeError> {
        let tree = self.fitted_tree(data.cols)?;
        validate_finite(data)?;
        tree.predict(data, parallel)
    }

    /// Predict the label of a single row.
    pub fn predict_one(&self, row: &[f64]) -> Result<usize, TreeError> {
        let tree = self.fitted_tree(row.len())?;
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(TreeError::NonFiniteValue(0, j));
        }
        tree.predict_row(row)
    }

    /// Calculate feature importance measure for the features
    /// in the model.
    /// - `method`: variable importance method to use.
    /// - `normalize`: whether to normalize the importance values with the sum.
    pub fn calculate_feature_importance(
        &self,
        method: ImportanceMethod,
        normalize: bool,
    ) -> Result<HashMap<usize, f64>, TreeError> {
        let tree = self.tree.as_ref().ok_or(TreeError::NotFitted)?;
        let (average, importance_fn): (bool, ImportanceFn) = match method {
            ImportanceMethod::Weight => (false, Tree::calculate_importance_weight),
            ImportanceMethod::Gain => (true, Tree::calculate_importance_gain),
            ImportanceMethod::TotalGain => (false, Tree::calculate_importance_gain),
            ImportanceMethod::Cover => (true, Tree::calculate_importance_cover),
            ImportanceMethod::TotalCover => (false, Tree::calculate_importance_cover),
        };
        let mut stats = HashMap::new();
        importance_fn(tree, &mut stats);

        let importance = stats
            .iter()
            .map(|(k, (v, c))| if average { (*k, v / (*c as f64)) } else { (*k, *v) })
            .collect::<HashMap<usize, f64>>();

        if normalize {
            // Sum in sorted order, so the total does not depend on the map's iteration order.
            let mut values: Vec<f64> = importance.values().copied().collect();
            values.sort_by(|a, b| a.total_cmp(b));
            let total: f64 = values.iter().sum();
            Ok(importance.iter().map(|(k, v)| (*k, v / total)).collect())
        } else {
            Ok(importance)
        }
    }

    /// Drop the fitted tree, leaving the classifier unfitted.
    fn clear_fit(&mut self) {
        self.tree = None;
        self.classes.clear();
        self.n_features_in = None;
    }

    /// The hyperparameters. Use the setters to change them.
    pub fn cfg(&self) -> &TreeConfig {
        &self.cfg
    }

    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// The fitted tree, if any.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Sorted distinct labels seen during fitting.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Number of features seen during fitting.
    pub fn n_features_in(&self) -> Option<usize> {
        self.n_features_in
    }
}
