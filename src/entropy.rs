//! Entropy
//!
//! Class-distribution entropy of a label subset, computed over a contiguous
//! count table indexed by class.
use crate::utils::unique_labels;

/// Count the labels of the rows in `index`.
///
/// * `y` - Labels for every row of the data.
/// * `index` - Rows making up the subset.
/// * `n_classes` - Length of the count table, one past the largest label code.
pub fn class_counts(y: &[usize], index: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for i in index {
        counts[y[*i]] += 1;
    }
    counts
}

/// Number of distinct label values present in a count table.
pub fn n_present(counts: &[usize]) -> usize {
    counts.iter().filter(|c| **c > 0).count()
}

/// Entropy, in bits, of a count table holding `n` labels.
///
/// Empty tables have an entropy of zero, and zero counts contribute nothing.
pub fn entropy_from_counts(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    -counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Entropy, in bits, of a label subset.
///
/// * `y` - Labels, possibly empty. Any `usize` values are accepted.
pub fn entropy(y: &[usize]) -> f64 {
    let classes = unique_labels(y);
    let mut counts = vec![0; classes.len()];
    for v in y {
        if let Ok(k) = classes.binary_search(v) {
            counts[k] += 1;
        }
    }
    entropy_from_counts(&counts, y.len())
}
