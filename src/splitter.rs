//! Splitter
//!
//! Information gain scoring of a single `(feature, threshold)` split, and the
//! exhaustive search for the best split of a node.
use crate::data::Matrix;
use crate::entropy::{class_counts, entropy_from_counts};
use crate::utils::unique_labels;
use serde::{Deserialize, Serialize};

/// Best split found for a node.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SplitInfo {
    /// Feature the rows are split on.
    pub split_feature: usize,
    /// Rows with `x <= split_value` go left, the others go right.
    pub split_value: f64,
    /// Information gain of the split, in bits.
    pub split_gain: f64,
}

/// Gain of splitting a subset with entropy `parent_entropy` into the given
/// left and right count tables. Callers guarantee both sides are non empty.
fn gain_from_counts(
    parent_entropy: f64,
    left_counts: &[usize],
    n_left: usize,
    right_counts: &[usize],
    n_right: usize,
) -> f64 {
    let n = (n_left + n_right) as f64;
    parent_entropy
        - (n_left as f64 / n) * entropy_from_counts(left_counts, n_left)
        - (n_right as f64 / n) * entropy_from_counts(right_counts, n_right)
}

/// Information gain of splitting the rows in `index` on `feature` at `threshold`.
///
/// Returns exactly `0.0` when the split leaves one side empty.
///
/// * `data` - Feature matrix.
/// * `y` - Labels for every row of `data`. Any `usize` values are accepted.
/// * `index` - Rows of the node being split.
/// * `feature` - Column to split on.
/// * `threshold` - Rows with a value `<= threshold` go left.
pub fn information_gain(data: &Matrix<f64>, y: &[usize], index: &[usize], feature: usize, threshold: f64) -> f64 {
    // Count tables are indexed by position among the subset's distinct labels.
    let classes = unique_labels(&index.iter().map(|i| y[*i]).collect::<Vec<_>>());
    let code = |i: usize| classes.binary_search(&y[i]).unwrap_or_else(|k| k);
    let col = data.get_col(feature);
    let mut left_counts = vec![0; classes.len()];
    let mut right_counts = vec![0; classes.len()];
    let mut n_left = 0;
    for i in index {
        if col[*i] <= threshold {
            left_counts[code(*i)] += 1;
            n_left += 1;
        } else {
            right_counts[code(*i)] += 1;
        }
    }
    let n_right = index.len() - n_left;
    if n_left == 0 || n_right == 0 {
        return 0.0;
    }
    let parent_counts: Vec<usize> = left_counts.iter().zip(&right_counts).map(|(l, r)| l + r).collect();
    let parent_entropy = entropy_from_counts(&parent_counts, index.len());
    gain_from_counts(parent_entropy, &left_counts, n_left, &right_counts, n_right)
}

/// Search every feature and every distinct value of the node for the split
/// with the highest information gain.
///
/// Features are scanned in ascending order, and thresholds in ascending order of
/// the unique values the node holds for that feature. On ties the first
/// candidate seen is kept. A candidate with zero gain is still returned when
/// nothing better exists; `None` means there was no candidate at all.
///
/// * `data` - Feature matrix.
/// * `y` - Labels for every row of `data`.
/// * `index` - Rows of the node being split.
/// * `n_classes` - Length of the label count tables, greater than every label in `y`.
pub fn best_split(data: &Matrix<f64>, y: &[usize], index: &[usize], n_classes: usize) -> Option<SplitInfo> {
    let n = index.len();
    let parent_counts = class_counts(y, index, n_classes);
    let parent_entropy = entropy_from_counts(&parent_counts, n);

    let mut best: Option<SplitInfo> = None;
    let mut best_gain = -1.0;

    let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(n);
    let mut left_counts = vec![0; n_classes];
    let mut right_counts = vec![0; n_classes];

    for feature in 0..data.cols {
        let col = data.get_col(feature);
        pairs.clear();
        pairs.extend(index.iter().map(|i| (col[*i], y[*i])));
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        left_counts.iter_mut().for_each(|c| *c = 0);
        let mut pos = 0;
        while pos < n {
            // Move the whole run of equal values to the left side.
            let value = pairs[pos].0;
            left_counts[pairs[pos].1] += 1;
            pos += 1;
            while pos < n && pairs[pos].0 == value {
                left_counts[pairs[pos].1] += 1;
                pos += 1;
            }

            let n_right = n - pos;
            let gain = if n_right == 0 {
                0.0
            } else {
                for (r, (p, l)) in right_counts.iter_mut().zip(parent_counts.iter().zip(left_counts.iter())) {
                    *r = p - l;
                }
                gain_from_counts(parent_entropy, &left_counts, pos, &right_counts, n_right)
            };

            if gain > best_gain {
                best_gain = gain;
                best = Some(SplitInfo {
                    split_feature: feature,
                    split_value: value,
                    split_gain: gain,
                });
            }
        }
    }
    best
}

/// Partition the rows of a node by a split, keeping their relative order.
///
/// Returns the `(left, right)` row indices.
pub fn partition_index(data: &Matrix<f64>, index: &[usize], feature: usize, threshold: f64) -> (Vec<usize>, Vec<usize>) {
    let col = data.get_col(feature);
    index.iter().partition(|i| col[**i] <= threshold)
}
