use crate::classifier::config::TreeConfig;
use crate::constants::PARALLEL_MIN_SAMPLES;
use crate::data::Matrix;
use crate::entropy::{class_counts, n_present};
use crate::errors::TreeError;
use crate::node::Node;
use crate::splitter::{best_split, partition_index};
use crate::utils::{unique_labels, validate_finite};
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Why a node was turned into a leaf.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LeafReason {
    MaxDepth,
    Pure,
    MinSamplesSplit,
    NoGain,
    MinSamplesLeaf,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Tree {
    pub root: Node,
    pub depth: usize,
    pub n_leaves: usize,
    pub n_features: usize,
    pub n_classes: usize,
    /// Sorted distinct training labels. Leaves hold labels from this list.
    pub classes: Vec<usize>,
}

/// Shared state of one fit, handed down the recursion.
struct TreeGrower<'a> {
    data: &'a Matrix<'a, f64>,
    /// Dense class codes, `y[i]` indexes into `classes`.
    y: &'a [usize],
    classes: &'a [usize],
    cfg: &'a TreeConfig,
}

impl<'a> TreeGrower<'a> {
    fn leaf(&self, index: &[usize], counts: &[usize], depth: usize, reason: LeafReason) -> Node {
        if depth == 0 {
            debug!("Root is a leaf, stopped by {:?}.", reason);
        }
        Node::Leaf {
            value: self.classes[majority_label(self.y, index, counts)],
            num_samples: index.len(),
        }
    }

    fn grow(&self, index: Vec<usize>, depth: usize) -> Node {
        let n_samples = index.len();
        let counts = class_counts(self.y, &index, self.classes.len());

        // Stopping rules, first match wins.
        if depth >= self.cfg.max_depth {
            return self.leaf(&index, &counts, depth, LeafReason::MaxDepth);
        }
        if n_present(&counts) == 1 {
            return self.leaf(&index, &counts, depth, LeafReason::Pure);
        }
        if n_samples < self.cfg.min_samples_split {
            return self.leaf(&index, &counts, depth, LeafReason::MinSamplesSplit);
        }

        let split = match best_split(self.data, self.y, &index, self.classes.len()) {
            Some(s) if s.split_gain > 0.0 => s,
            _ => return self.leaf(&index, &counts, depth, LeafReason::NoGain),
        };

        let (left_index, right_index) = partition_index(self.data, &index, split.split_feature, split.split_value);
        if left_index.len() < self.cfg.min_samples_leaf || right_index.len() < self.cfg.min_samples_leaf {
            debug!(
                "Rejected split on feature {} at {} with gain {}, children of size {} and {} are below min_samples_leaf.",
                split.split_feature,
                split.split_value,
                split.split_gain,
                left_index.len(),
                right_index.len()
            );
            return self.leaf(&index, &counts, depth, LeafReason::MinSamplesLeaf);
        }
        drop(index);

        let (left, right) = if n_samples >= PARALLEL_MIN_SAMPLES {
            rayon::join(|| self.grow(left_index, depth + 1), || self.grow(right_index, depth + 1))
        } else {
            (self.grow(left_index, depth + 1), self.grow(right_index, depth + 1))
        };

        Node::Internal {
            split_feature: split.split_feature,
            split_value: split.split_value,
            split_gain: split.split_gain,
            num_samples: n_samples,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Most frequent label among the rows in `index`.
///
/// Ties go to the label whose first row comes earliest in `index`.
/// `counts` must be the count table of the same rows indexed by label, and
/// `index` must not be empty.
pub fn majority_label(y: &[usize], index: &[usize], counts: &[usize]) -> usize {
    let mut value = y[index[0]];
    let mut best_count = 0;
    for i in index {
        let label = y[*i];
        if counts[label] > best_count {
            value = label;
            best_count = counts[label];
        }
    }
    value
}

impl Tree {
    /// Grow a tree on the whole of `data`.
    ///
    /// * `data` - Dense feature matrix.
    /// * `y` - Class labels, one per row. Any `usize` values are accepted.
    /// * `cfg` - Stopping rule hyperparameters.
    pub fn fit(data: &Matrix<f64>, y: &[usize], cfg: &TreeConfig) -> Result<Self, TreeError> {
        cfg.validate()?;
        if y.len() != data.rows {
            return Err(TreeError::LabelLengthMismatch(data.rows, y.len()));
        }
        if data.rows == 0 {
            return Err(TreeError::EmptyData(data.rows, data.cols));
        }
        validate_finite(data)?;

        // Grow on dense codes so count tables stay sized by the number of classes.
        let classes = unique_labels(y);
        let codes: Vec<usize> = y
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_else(|i| i))
            .collect();

        let grower = TreeGrower {
            data,
            y: &codes,
            classes: &classes,
            cfg,
        };
        let root = grower.grow(data.index.to_owned(), 0);

        Ok(Tree {
            depth: root.depth(),
            n_leaves: root.n_leaves(),
            n_features: data.cols,
            n_classes: classes.len(),
            classes,
            root,
        })
    }

    fn calc_feature_node_stats<F>(&self, calc_stat: &F, node: &Node, stats: &mut HashMap<usize, (f64, usize)>)
    where
        F: Fn(&Node) -> f64,
    {
        if let Node::Internal {
            split_feature,
            left,
            right,
            ..
        } = node
        {
            stats
                .entry(*split_feature)
                .and_modify(|(v, c)| {
                    *v += calc_stat(node);
                    *c += 1;
                })
                .or_insert((calc_stat(node), 1));
            self.calc_feature_node_stats(calc_stat, left, stats);
            self.calc_feature_node_stats(calc_stat, right, stats);
        }
    }

    /// Number of splits per feature.
    pub fn calculate_importance_weight(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(&|_: &Node| 1., &self.root, stats);
    }

    /// Information gain accumulated per feature.
    pub fn calculate_importance_gain(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(
            &|n: &Node| match n {
                Node::Internal { split_gain, .. } => *split_gain,
                Node::Leaf { .. } => 0.,
            },
            &self.root,
            stats,
        );
    }

    /// Training rows split per feature.
    pub fn calculate_importance_cover(&self, stats: &mut HashMap<usize, (f64, usize)>) {
        self.calc_feature_node_stats(&|n: &Node| n.num_samples() as f64, &self.root, stats);
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<(&Node, usize)> = vec![(&self.root, 0)];
        let mut r = String::new();
        while let Some((node, depth)) = print_buffer.pop() {
            r += format!("{}{}\n", "      ".repeat(depth).as_str(), node).as_str();
            if let Node::Internal { left, right, .. } = node {
                print_buffer.push((right.as_ref(), depth + 1));
                print_buffer.push((left.as_ref(), depth + 1));
            }
        }
        write!(f, "{}", r)
    }
}
