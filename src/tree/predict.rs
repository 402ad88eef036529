//! Tree Prediction Methods
//!
//! Traversal of a fitted tree, for a single row or for every row of a matrix.
use super::tree::Tree;
use crate::errors::TreeError;
use crate::node::Node;
use crate::Matrix;
use rayon::prelude::*;

impl Tree {
    /// Walk from the root to a leaf, reading feature `j` of the row with `feature_value(j)`.
    fn traverse<F>(&self, feature_value: F) -> usize
    where
        F: Fn(usize) -> f64,
    {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value, .. } => return *value,
                Node::Internal {
                    split_feature,
                    split_value,
                    left,
                    right,
                    ..
                } => {
                    node = if feature_value(*split_feature) <= *split_value {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    fn check_n_features(&self, found: usize) -> Result<(), TreeError> {
        if found == self.n_features {
            Ok(())
        } else {
            Err(TreeError::ShapeMismatch(self.n_features, found))
        }
    }

    /// Predict the label of a single row.
    ///
    /// * `row` - Feature values, exactly `n_features` long.
    pub fn predict_row(&self, row: &[f64]) -> Result<usize, TreeError> {
        self.check_n_features(row.len())?;
        Ok(self.traverse(|j| row[j]))
    }

    fn predict_single_threaded(&self, data: &Matrix<f64>) -> Vec<usize> {
        data.index
            .iter()
            .map(|i| self.traverse(|j| *data.get(*i, j)))
            .collect()
    }

    fn predict_parallel(&self, data: &Matrix<f64>) -> Vec<usize> {
        data.index
            .par_iter()
            .map(|i| self.traverse(|j| *data.get(*i, j)))
            .collect()
    }

    /// Predict a label for every row of `data`, in row order.
    ///
    /// * `data` - Dense feature matrix with `n_features` columns.
    /// * `parallel` - Spread the rows over the rayon thread pool.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<usize>, TreeError> {
        self.check_n_features(data.cols)?;
        if parallel {
            Ok(self.predict_parallel(data))
        } else {
            Ok(self.predict_single_threaded(data))
        }
    }
}
