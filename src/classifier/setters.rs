use crate::classifier::DecisionTreeClassifier;
use crate::errors::TreeError;

impl DecisionTreeClassifier {
    // Set methods for paramters.
    // A fitted tree is dropped whenever a hyperparameter actually changes.

    /// Set the max_depth on the classifier.
    /// * `max_depth` - Depth at which nodes become leaves. Zero fits a single leaf.
    pub fn set_max_depth(mut self, max_depth: usize) -> Self {
        if self.cfg.max_depth != max_depth {
            self.cfg.max_depth = max_depth;
            self.clear_fit();
        }
        self
    }

    /// Set the min_samples_split on the classifier.
    /// * `min_samples_split` - Nodes with fewer training rows than this are not split.
    pub fn set_min_samples_split(mut self, min_samples_split: usize) -> Self {
        if self.cfg.min_samples_split != min_samples_split {
            self.cfg.min_samples_split = min_samples_split;
            self.clear_fit();
        }
        self
    }

    /// Set the min_samples_leaf on the classifier.
    /// * `min_samples_leaf` - Splits leaving fewer training rows than this in a child
    ///   are rejected, and the node becomes a leaf.
    pub fn set_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        if self.cfg.min_samples_leaf != min_samples_leaf {
            self.cfg.min_samples_leaf = min_samples_leaf;
            self.clear_fit();
        }
        self
    }

    /// Set several hyperparameters by name.
    ///
    /// Either every pair is applied or, on the first unknown name or invalid
    /// value, none is. If the configuration changes, the fitted tree is dropped
    /// and the classifier must be fitted again before predicting.
    ///
    /// * `params` - Pairs of parameter name and value.
    pub fn set_params(&mut self, params: &[(&str, i64)]) -> Result<(), TreeError> {
        let mut cfg = self.cfg.clone();
        for (name, value) in params {
            cfg.set_param(name, *value)?;
        }
        if cfg != self.cfg {
            self.cfg = cfg;
            self.clear_fit();
        }
        Ok(())
    }
}
