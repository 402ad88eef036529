use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a fitted tree.
///
/// Every internal node owns its two children, so the structure is a strict
/// binary tree rooted at the fitted model.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum Node {
    /// Terminal node predicting a single class.
    Leaf {
        /// Majority label of the training rows that reached the node.
        value: usize,
        /// Number of training rows that reached the node.
        num_samples: usize,
    },
    /// Split node, rows with `x[split_feature] <= split_value` go left.
    Internal {
        split_feature: usize,
        split_value: f64,
        split_gain: f64,
        num_samples: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn num_samples(&self) -> usize {
        match self {
            Node::Leaf { num_samples, .. } | Node::Internal { num_samples, .. } => *num_samples,
        }
    }

    /// Number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf { value, num_samples } => write!(f, "leaf={},cover={}", value, num_samples),
            Node::Internal {
                split_feature,
                split_value,
                split_gain,
                num_samples,
                ..
            } => write!(
                f,
                "[{} <= {}] gain={},cover={}",
                split_feature, split_value, split_gain, num_samples
            ),
        }
    }
}
