use minicart::prelude::*;
use rand::prelude::*;

use std::collections::HashMap;


// Toy example (o/x are the pos/neg examples, numbers are row ids).
// The example is separable by `feature 0 <= 2`
// as well as by `feature 1 <= 0`.
//
//  1|              2o   3o   4o
//   |
//  0|  5x   0x   1x
//   |________________________
//      0    1    2    3    4    5
fn separable() -> Sample {
    let rows = vec![
        vec![1.0, 0.0, 0.0],
        vec![2.0, 0.0, 0.0],
        vec![3.0, 1.0, 1.0],
        vec![4.0, 1.0, 1.0],
        vec![5.0, 1.0, 1.0],
        vec![0.0, 0.0, 0.0],
    ];
    Sample::from_rows(rows).unwrap()
}


/// A random sample whose label mostly follows `x0 + x1 > 10`.
fn random_sample(seed: u64, n_sample: usize, n_feature: usize) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n_sample).map(|_| {
            let mut row = (0..n_feature)
                .map(|_| rng.gen_range(0..10) as f64)
                .collect::<Vec<_>>();
            let noisy = rng.gen_bool(0.1);
            let y = (row[0] + row[1] > 10.0) ^ noisy;
            row.push(if y { 1.0 } else { 0.0 });
            row
        })
        .collect::<Vec<_>>();
    Sample::from_rows(rows).unwrap()
}


/// Replays the growing procedure on the training rows and checks
/// the invariants of every node.
fn check_node(
    node: &Node,
    sample: &Sample,
    indices: &[usize],
    min_leaf_size: usize,
    ancestors: &mut Vec<usize>,
)
{
    match node {
        Node::Branch { splitter, left, right, .. } => {
            assert!(
                !ancestors.contains(&splitter.feature),
                "feature {} is reused below an ancestor that split on it. \
                ancestors: {ancestors:?}",
                splitter.feature,
            );

            let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices.iter()
                .copied()
                .partition(|&i| {
                    sample.row(i)[splitter.feature] <= splitter.threshold
                });

            assert_eq!(lindices.len() + rindices.len(), indices.len());
            assert!(lindices.len() >= min_leaf_size);
            assert!(rindices.len() >= min_leaf_size);

            ancestors.push(splitter.feature);
            check_node(left, sample, &lindices, min_leaf_size, ancestors);
            check_node(right, sample, &rindices, min_leaf_size, ancestors);
            ancestors.pop();
        },
        Node::Leaf { n_pos, n_neg, .. } => {
            let pos = indices.iter()
                .filter(|&&i| sample.target(i) == 1.0)
                .count();
            assert_eq!(*n_pos, pos);
            assert_eq!(*n_neg, indices.len() - pos);
        },
    }
}


#[test]
fn separable_example() {
    let sample = separable();
    let mut tree = DecisionTree::new(2);
    tree.build_tree(&sample).unwrap();

    let root = tree.root().unwrap();
    let Node::Branch { impurity, left, right, .. } = root else {
        panic!("expected a split at the root, got {root:?}");
    };
    assert_eq!(*impurity, 0.0);

    let Node::Leaf { n_pos, n_neg, .. } = &**left else {
        panic!("expected a leaf, got {left:?}");
    };
    assert_eq!(*n_pos, 0);
    assert!(*n_neg >= 2);

    let Node::Leaf { n_pos, n_neg, .. } = &**right else {
        panic!("expected a leaf, got {right:?}");
    };
    assert!(*n_pos >= 2);
    assert_eq!(*n_neg, 0);

    assert_eq!(tree.predict(&[3.0, 1.0]).unwrap(), 1);
    assert_eq!(tree.predict(&[0.5, 0.0]).unwrap(), 0);
}


#[test]
fn single_row_is_a_single_leaf() {
    for y in [0.0, 1.0] {
        let sample = Sample::from_rows(vec![vec![4.2, 1.0, y]]).unwrap();
        let mut tree = DecisionTree::new(0);
        tree.build_tree(&sample).unwrap();

        let exp = if y == 1.0 { (1, 0) } else { (0, 1) };
        let root = tree.root().unwrap();
        let Node::Leaf { n_pos, n_neg, .. } = root else {
            panic!("expected a leaf, got {root:?}");
        };
        assert_eq!((*n_pos, *n_neg), exp);
    }
}


#[test]
fn small_sample_is_a_single_leaf() {
    let rows = vec![
        vec![1.0, 0.0],
        vec![2.0, 1.0],
        vec![3.0, 0.0],
        vec![4.0, 1.0],
    ];
    let sample = Sample::from_rows(rows).unwrap();
    let mut tree = DecisionTree::new(5);
    tree.build_tree(&sample).unwrap();

    let root = tree.root().unwrap();
    assert!(root.is_leaf(), "expected a leaf, got {root:?}");
    assert_eq!(root.n_nodes(), 1);
}


#[test]
fn leaf_size_rule_uses_less_or_equal() {
    // Exactly `min_leaf_size` rows: never split.
    let rows = (0..5).map(|i| vec![i as f64, (i % 2) as f64])
        .collect::<Vec<_>>();
    let sample = Sample::from_rows(rows).unwrap();
    let mut tree = DecisionTree::new(5);
    tree.build_tree(&sample).unwrap();
    assert!(tree.root().unwrap().is_leaf());
}


#[test]
fn growing_invariants_hold_on_random_samples() {
    for (seed, min_leaf_size) in [(1, 0), (2, 1), (3, 2), (4, 5), (5, 10)] {
        let sample = random_sample(seed, 200, 4);
        let mut tree = DecisionTree::new(min_leaf_size);
        tree.build_tree(&sample).unwrap();

        let root = tree.root().unwrap();
        let indices = (0..sample.len()).collect::<Vec<_>>();
        check_node(root, &sample, &indices, min_leaf_size, &mut Vec::new());
    }
}


#[test]
fn every_training_row_reaches_the_leaf_that_counted_it() {
    let sample = random_sample(42, 300, 3);
    let mut tree = DecisionTree::new(3);
    tree.build_tree(&sample).unwrap();
    let root = tree.root().unwrap();

    // Leaves are identified by their address.
    let mut tally: HashMap<*const Node, (&Node, usize, usize)> = HashMap::new();
    for i in 0..sample.len() {
        let leaf = root.leaf_of(sample.features(i)).unwrap();
        let entry = tally.entry(leaf as *const Node).or_insert((leaf, 0, 0));
        if sample.target(i) == 1.0 { entry.1 += 1; } else { entry.2 += 1; }

        let Node::Leaf { n_pos, n_neg, .. } = leaf else {
            panic!("leaf_of returned a branch");
        };
        let majority = if n_pos >= n_neg { 1 } else { 0 };
        assert_eq!(tree.predict(sample.features(i)).unwrap(), majority);
    }

    assert_eq!(tally.len(), root.n_leaves());
    for &(leaf, pos, neg) in tally.values() {
        let Node::Leaf { n_pos, n_neg, .. } = leaf else { unreachable!() };
        assert_eq!((*n_pos, *n_neg), (pos, neg));
    }
}


#[test]
fn accuracy_uses_the_training_size() {
    let sample = random_sample(7, 150, 3);
    let mut tree = DecisionTree::new(5);
    tree.build_tree(&sample).unwrap();

    let accuracy = tree.calculate_accuracy().unwrap();
    assert!((0.0..=1.0).contains(&accuracy), "got {accuracy}");

    let replayed = tree.accuracy_on(&sample).unwrap();
    assert!(
        (accuracy - replayed).abs() < 1e-12,
        "calculate_accuracy = {accuracy}, accuracy_on = {replayed}"
    );
}


#[test]
fn building_is_deterministic() {
    let sample = random_sample(11, 250, 5);

    let mut first = DecisionTree::new(2);
    first.build_tree(&sample).unwrap();
    let mut second = DecisionTree::new(2);
    second.build_tree(&sample).unwrap();

    assert_eq!(first.root(), second.root());
}


#[test]
fn max_depth_bounds_the_tree() {
    let sample = random_sample(3, 300, 6);
    let mut tree = DecisionTreeBuilder::new()
        .min_leaf_size(1)
        .max_depth(2)
        .build();
    tree.build_tree(&sample).unwrap();
    assert!(tree.root().unwrap().depth() <= 2);
}


#[test]
fn features_are_never_reused_on_a_path() {
    // With 2 features, no path can be longer than 2 splits.
    let sample = random_sample(5, 400, 2);
    let mut tree = DecisionTree::new(0);
    tree.build_tree(&sample).unwrap();
    assert!(tree.root().unwrap().depth() <= 2);
}


#[test]
fn print_is_idempotent() {
    let sample = random_sample(9, 120, 3);
    let mut tree = DecisionTree::new(4);
    tree.build_tree(&sample).unwrap();

    let first = tree.render_tree().unwrap();
    tree.print_tree();
    let second = tree.render_tree().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), tree.root().unwrap().n_nodes());
    assert!(first.starts_with("Root "));
}


#[test]
fn predicting_on_a_short_example_fails() {
    let mut tree = DecisionTree::new(2);
    tree.build_tree(&separable()).unwrap();

    let res = tree.predict(&[]);
    assert!(matches!(
        res,
        Err(TreeError::FeatureIndexOutOfRange { index: 0, len: 0 })
    ));
}


#[test]
fn predict_all_on_the_training_sample() {
    let sample = separable();
    let mut tree = DecisionTree::new(2);
    tree.build_tree(&sample).unwrap();

    let predictions = tree.predict_all(&sample).unwrap();
    assert_eq!(predictions, vec![0, 0, 1, 1, 1, 0]);
    assert_eq!(tree.accuracy_on(&sample).unwrap(), 1.0);
}


#[test]
fn tree_from_config_json() {
    let config = TreeConfig::from_json(r#"{"min_leaf_size": 2}"#).unwrap();
    let mut tree = DecisionTreeBuilder::from_config(config).build();
    tree.build_tree(&separable()).unwrap();
    assert_eq!(tree.root().unwrap().n_leaves(), 2);
}


#[test]
fn to_dot_file() {
    let mut tree = DecisionTree::new(2);
    tree.build_tree(&separable()).unwrap();

    let mut path = std::env::temp_dir();
    path.push(format!("minicart-{}.dot", std::process::id()));
    tree.to_dot_file(&path).unwrap();

    let dot = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(dot.starts_with("graph DecisionTree {"));
    assert!(dot.contains("node_0 -- node_1"));
    assert!(dot.trim_end().ends_with('}'));
}


#[test]
fn render_branch_over_a_mixed_leaf() {
    let rows = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![2.0, 1.0],
        vec![2.0, 1.0],
        vec![2.0, 1.0],
    ];
    let sample = Sample::from_rows(rows).unwrap();
    let mut tree = DecisionTreeBuilder::new()
        .min_leaf_size(1)
        .leaf_impurity(LeafImpurity::Measured)
        .build();
    tree.build_tree(&sample).unwrap();

    let exp = "\
        Root Node: Feature 0 <= 1, Gini: 0.2000\n\
        |---- Leaf: Class = Positive (n1=1, n2=1), Gini: 0.5000\n\
        |---- Leaf: Class = Positive (n1=3, n2=0), Gini: 0.0000\n\
    ";
    assert_eq!(tree.render_tree().unwrap(), exp);
}
