pub mod predict;
pub mod tree;

// Unit-testing
#[cfg(test)]
mod tests {
    use crate::classifier::config::TreeConfig;
    use crate::errors::TreeError;
    use crate::node::Node;
    use crate::tree::tree::{majority_label, Tree};
    use crate::Matrix;
    use hashbrown::HashMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn random_data(rows: usize, cols: usize, seed: u64) -> (Vec<f64>, Vec<usize>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let data_vec: Vec<f64> = (0..rows * cols).map(|_| (rng.gen::<f64>() * 20.0).round() / 4.0).collect();
        let y: Vec<usize> = (0..rows)
            .map(|i| {
                let s = data_vec[i] + data_vec[rows + i];
                let label = if s > 5.0 { 1 } else { 0 };
                if rng.gen::<f64>() < 0.1 {
                    2
                } else {
                    label
                }
            })
            .collect();
        (data_vec, y)
    }

    fn path_lengths(node: &Node, depth: usize, out: &mut Vec<usize>) {
        out.push(depth);
        if let Node::Internal { left, right, .. } = node {
            path_lengths(left, depth + 1, out);
            path_lengths(right, depth + 1, out);
        }
    }

    /// Route the training rows down the tree, checking every split partitions its rows.
    fn check_partition(node: &Node, data: &Matrix<f64>, index: &[usize]) {
        assert_eq!(node.num_samples(), index.len());
        if let Node::Internal {
            split_feature,
            split_value,
            left,
            right,
            ..
        } = node
        {
            let left_index: Vec<usize> = index
                .iter()
                .copied()
                .filter(|i| data.get(*i, *split_feature) <= split_value)
                .collect();
            let right_index: Vec<usize> = index
                .iter()
                .copied()
                .filter(|i| data.get(*i, *split_feature) > split_value)
                .collect();
            let l: HashSet<usize> = left_index.iter().copied().collect();
            let r: HashSet<usize> = right_index.iter().copied().collect();
            assert!(l.is_disjoint(&r));
            let mut union: Vec<usize> = l.union(&r).copied().collect();
            union.sort();
            let mut expected = index.to_vec();
            expected.sort();
            assert_eq!(union, expected);
            check_partition(left, data, &left_index);
            check_partition(right, data, &right_index);
        }
    }

    #[test]
    fn test_tree_fit_stump() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 0, 1, 1];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        println!("{}", tree);

        match &tree.root {
            Node::Internal {
                split_feature,
                split_value,
                left,
                right,
                ..
            } => {
                assert_eq!(*split_feature, 0);
                assert_eq!(*split_value, 2.0);
                assert_eq!(**left, Node::Leaf { value: 0, num_samples: 2 });
                assert_eq!(**right, Node::Leaf { value: 1, num_samples: 2 });
            }
            Node::Leaf { .. } => panic!("Expected a split at the root."),
        }
        assert_eq!(tree.depth, 1);
        assert_eq!(tree.n_leaves, 2);
        assert_eq!(tree.predict_row(&[1.5]).unwrap(), 0);
        assert_eq!(tree.predict_row(&[3.5]).unwrap(), 1);
    }

    #[test]
    fn test_tree_pure_labels() {
        let v = vec![4.0, 3.0, 2.0, 1.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![1, 1, 1, 1];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        assert_eq!(tree.root, Node::Leaf { value: 1, num_samples: 4 });
    }

    #[test]
    fn test_tree_min_samples_split() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let data = Matrix::new(&v, 4, 1);
        // Two of each, the label seen first wins.
        let y = vec![1, 0, 1, 0];
        let cfg = TreeConfig {
            min_samples_split: 10,
            ..TreeConfig::default()
        };
        let tree = Tree::fit(&data, &y, &cfg).unwrap();
        assert_eq!(tree.root, Node::Leaf { value: 1, num_samples: 4 });
    }

    #[test]
    fn test_tree_max_depth_zero() {
        let (v, y) = random_data(200, 3, 0);
        let data = Matrix::new(&v, 200, 3);
        let cfg = TreeConfig {
            max_depth: 0,
            ..TreeConfig::default()
        };
        let tree = Tree::fit(&data, &y, &cfg).unwrap();
        assert!(tree.root.is_leaf());
        assert_eq!(tree.n_leaves, 1);
    }

    #[test]
    fn test_tree_no_gain_is_leaf() {
        // Every row looks the same, nothing can separate the labels.
        let v = vec![2.0, 2.0, 2.0, 2.0, 2.0];
        let data = Matrix::new(&v, 5, 1);
        let y = vec![0, 1, 1, 0, 1];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        assert_eq!(tree.root, Node::Leaf { value: 1, num_samples: 5 });
    }

    #[test]
    fn test_tree_min_samples_leaf_rejects_split() {
        // The best split isolates row 0, which is below the leaf size floor.
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let data = Matrix::new(&v, 5, 1);
        let y = vec![0, 1, 1, 1, 1];
        let cfg = TreeConfig {
            min_samples_leaf: 2,
            ..TreeConfig::default()
        };
        let tree = Tree::fit(&data, &y, &cfg).unwrap();
        assert_eq!(tree.root, Node::Leaf { value: 1, num_samples: 5 });

        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        assert!(!tree.root.is_leaf());
    }

    #[test]
    fn test_tree_respects_max_depth() {
        let (v, y) = random_data(300, 3, 1);
        let data = Matrix::new(&v, 300, 3);
        for max_depth in 0..6 {
            let cfg = TreeConfig {
                max_depth,
                ..TreeConfig::default()
            };
            let tree = Tree::fit(&data, &y, &cfg).unwrap();
            let mut lengths = Vec::new();
            path_lengths(&tree.root, 0, &mut lengths);
            assert!(lengths.iter().all(|l| *l <= max_depth));
            assert!(tree.depth <= max_depth);
        }
    }

    #[test]
    fn test_tree_splits_partition_rows() {
        let (v, y) = random_data(400, 4, 2);
        let data = Matrix::new(&v, 400, 4);
        let cfg = TreeConfig {
            min_samples_leaf: 3,
            ..TreeConfig::default()
        };
        let tree = Tree::fit(&data, &y, &cfg).unwrap();
        check_partition(&tree.root, &data, &data.index);
    }

    #[test]
    fn test_tree_predicts_training_labels() {
        let (v, y) = random_data(300, 3, 3);
        let data = Matrix::new(&v, 300, 3);
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        let labels: HashSet<usize> = y.iter().copied().collect();

        let (v_new, _) = random_data(100, 3, 4);
        let data_new = Matrix::new(&v_new, 100, 3);
        let preds = tree.predict(&data_new, false).unwrap();
        assert_eq!(preds.len(), 100);
        assert!(preds.iter().all(|p| labels.contains(p)));

        // Idempotent, and the parallel path agrees with the sequential one.
        assert_eq!(preds, tree.predict(&data_new, false).unwrap());
        assert_eq!(preds, tree.predict(&data_new, true).unwrap());
        for i in 0..data_new.rows {
            assert_eq!(preds[i], tree.predict_row(&data_new.get_row(i)).unwrap());
        }
    }

    #[test]
    fn test_tree_fit_deterministic() {
        // Large enough for the children of the root to be grown in parallel.
        let (v, y) = random_data(10_000, 3, 5);
        let data = Matrix::new(&v, 10_000, 3);
        let cfg = TreeConfig {
            max_depth: 6,
            ..TreeConfig::default()
        };
        let tree1 = Tree::fit(&data, &y, &cfg).unwrap();
        let tree2 = Tree::fit(&data, &y, &cfg).unwrap();
        assert_eq!(tree1, tree2);
        check_partition(&tree1.root, &data, &data.index);
    }

    #[test]
    fn test_tree_fit_errors() {
        let v = vec![1.0, 2.0, 3.0];
        let data = Matrix::new(&v, 3, 1);
        assert!(Tree::fit(&data, &[0, 1], &TreeConfig::default()).is_err());

        let empty: Vec<f64> = Vec::new();
        let data = Matrix::new(&empty, 0, 2);
        assert!(Tree::fit(&data, &[], &TreeConfig::default()).is_err());

        let data = Matrix::new(&v, 3, 1);
        let cfg = TreeConfig {
            min_samples_leaf: 0,
            ..TreeConfig::default()
        };
        assert!(Tree::fit(&data, &[0, 1, 0], &cfg).is_err());

        let v = vec![1.0, f64::NAN, 3.0];
        let data = Matrix::new(&v, 3, 1);
        assert_eq!(
            Tree::fit(&data, &[0, 1, 0], &TreeConfig::default()),
            Err(TreeError::NonFiniteValue(1, 0))
        );
    }

    #[test]
    fn test_tree_predict_shape_mismatch() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 0.5, 0.5, 0.5, 0.5];
        let data = Matrix::new(&v, 4, 2);
        let tree = Tree::fit(&data, &[0, 0, 1, 1], &TreeConfig::default()).unwrap();

        let narrow = Matrix::new(&v[..4], 4, 1);
        assert_eq!(tree.predict(&narrow, false), Err(TreeError::ShapeMismatch(2, 1)));
        assert_eq!(tree.predict(&narrow, true), Err(TreeError::ShapeMismatch(2, 1)));
        let wide_v = vec![1.0; 12];
        let wide = Matrix::new(&wide_v, 4, 3);
        assert_eq!(tree.predict(&wide, false), Err(TreeError::ShapeMismatch(2, 3)));

        assert_eq!(tree.predict_row(&[3.5]), Err(TreeError::ShapeMismatch(2, 1)));
        assert_eq!(tree.predict_row(&[3.5, 0.5, 0.5]), Err(TreeError::ShapeMismatch(2, 3)));
        assert_eq!(tree.predict_row(&[3.5, 0.5]), Ok(1));
    }

    #[test]
    fn test_tree_large_labels() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 0, 1 << 60, 1 << 60];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        assert_eq!(tree.n_classes, 2);
        assert_eq!(tree.classes, vec![0, 1 << 60]);
        assert_eq!(tree.depth, 1);
        assert_eq!(tree.predict_row(&[1.5]).unwrap(), 0);
        assert_eq!(tree.predict_row(&[3.5]).unwrap(), 1 << 60);

        // Remapping keeps the first-seen tie-break.
        let y = vec![usize::MAX, 7, usize::MAX, 7];
        let cfg = TreeConfig {
            max_depth: 0,
            ..TreeConfig::default()
        };
        let tree = Tree::fit(&data, &y, &cfg).unwrap();
        assert_eq!(tree.root, Node::Leaf { value: usize::MAX, num_samples: 4 });
        let tree = Tree::fit(&data, &[usize::MAX, usize::MAX, 5, 5], &TreeConfig::default()).unwrap();
        assert_eq!(tree.predict(&data, false).unwrap(), vec![usize::MAX, usize::MAX, 5, 5]);
    }

    #[test]
    fn test_majority_label_first_seen_wins_ties() {
        let y = vec![2, 0, 0, 2, 1];
        let counts = vec![2, 1, 2];
        assert_eq!(majority_label(&y, &[0, 1, 2, 3, 4], &counts), 2);
        assert_eq!(majority_label(&y, &[1, 0, 2, 3, 4], &counts), 0);
        assert_eq!(majority_label(&y, &[4], &[0, 1, 0]), 1);
    }

    #[test]
    fn test_tree_importance() {
        let v = vec![
            5.0, 1.0, 5.0, 1.0, //
            0.1, 0.2, 0.8, 0.9,
        ];
        let data = Matrix::new(&v, 4, 2);
        let y = vec![0, 0, 1, 1];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();

        let mut stats = HashMap::new();
        tree.calculate_importance_weight(&mut stats);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[&1], (1.0, 1));

        let mut stats = HashMap::new();
        tree.calculate_importance_cover(&mut stats);
        assert_eq!(stats[&1], (4.0, 1));

        let mut stats = HashMap::new();
        tree.calculate_importance_gain(&mut stats);
        assert!((stats[&1].0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_display() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 0, 1, 1];
        let tree = Tree::fit(&data, &y, &TreeConfig::default()).unwrap();
        let expected = "[0 <= 2] gain=1,cover=4\n      leaf=0,cover=2\n      leaf=1,cover=2\n";
        assert_eq!(format!("{}", tree), expected);
    }
}
