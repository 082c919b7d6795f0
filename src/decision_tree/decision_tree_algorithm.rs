use fixedbitset::FixedBitSet;
use log::{debug, info, trace, warn};

use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::{Classifier, Sample};
use crate::error::{Result, TreeError};
use super::{
    best_split::*,
    builder::*,
    criterion::*,
    node::*,
};


/// A binary CART decision tree.
/// Given a table of rows whose last value is a `0/1` label,
/// [`DecisionTree`] grows a binary tree greedily,
/// choosing at each node the split that minimizes the weighted Gini score.
///
/// A feature chosen by an ancestor is not tried again below it,
/// but sibling branches may reuse it.
/// Splitting stops when a subset has at most `min_leaf_size` rows,
/// when no split separates the rows,
/// or when the best split leaves fewer than `min_leaf_size` rows on a side.
///
/// [`DecisionTree`] is constructed by [`DecisionTree::new`]
/// or [`DecisionTreeBuilder`].
///
/// # Example
/// ```
/// use minicart::prelude::*;
///
/// let rows = vec![
///     vec![1.0, 0.0, 0.0],
///     vec![2.0, 0.0, 0.0],
///     vec![3.0, 1.0, 1.0],
///     vec![4.0, 1.0, 1.0],
///     vec![5.0, 1.0, 1.0],
///     vec![0.0, 0.0, 0.0],
/// ];
/// let sample = Sample::from_rows(rows).unwrap();
///
/// let mut tree = DecisionTree::new(2);
/// tree.build_tree(&sample).unwrap();
///
/// assert_eq!(tree.predict(&[3.0, 1.0]).unwrap(), 1);
/// assert_eq!(tree.calculate_accuracy().unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Box<Node>>,
    sample: Option<Sample>,
}


impl Default for DecisionTree {
    fn default() -> Self {
        Self::from_config(TreeConfig::default())
    }
}


impl DecisionTree {
    /// Construct an empty tree with the given minimal leaf size
    /// and default values for the other parameters.
    pub fn new(min_leaf_size: usize) -> Self {
        DecisionTreeBuilder::new()
            .min_leaf_size(min_leaf_size)
            .build()
    }


    /// Initialize [`DecisionTree`].
    /// This method is called via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_config(config: TreeConfig) -> Self {
        Self { config, root: None, sample: None, }
    }


    /// Returns the parameters of this tree.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }


    /// Returns `true` once `build_tree` has succeeded.
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }


    /// Returns the root node, if the tree has been built.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }


    /// Returns the copy of the sample the tree was built on.
    pub fn training_sample(&self) -> Option<&Sample> {
        self.sample.as_ref()
    }


    /// Grows the tree on `sample`.
    /// A previously built tree is discarded.
    ///
    /// Labels other than `0` and `1` are accepted
    /// but counted as negative in the leaves.
    pub fn build_tree(&mut self, sample: &Sample) -> Result<()> {
        let (n_sample, n_feature) = sample.shape();
        if n_sample == 0 || n_feature == 0 {
            return Err(TreeError::InsufficientData(format!(
                "cannot build a tree on {n_sample} rows \
                with {n_feature} feature(s)"
            )));
        }

        let n_non_binary = sample.targets()
            .filter(|&y| y != 0.0 && y != 1.0)
            .count();
        if n_non_binary > 0 {
            warn!(
                "{n_non_binary} label(s) are neither 0 nor 1; \
                they are counted as negative"
            );
        }

        self.root = None;
        self.sample = Some(sample.clone());

        let indices = (0..n_sample).collect::<Vec<_>>();
        let used = FixedBitSet::with_capacity(n_feature);
        let root = self.split_node(sample, indices, 0, used);

        info!(
            "built a decision tree on {n_sample} rows: \
            {} nodes, {} leaves, depth {}",
            root.n_nodes(),
            root.n_leaves(),
            root.depth(),
        );

        self.root = Some(root);
        Ok(())
    }


    /// Grows the sub-tree for the rows `indices` at depth `depth`.
    /// `used` holds the features chosen by the ancestors of this node;
    /// each child receives its own copy.
    fn split_node(
        &self,
        sample: &Sample,
        indices: Vec<usize>,
        depth: usize,
        mut used: FixedBitSet,
    ) -> Box<Node>
    {
        let min_leaf_size = self.config.min_leaf_size;

        // A small subset is never split.
        if indices.len() <= min_leaf_size {
            return self.create_leaf_node(sample, &indices);
        }

        if self.config.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            return self.create_leaf_node(sample, &indices);
        }

        // No unused feature left.
        let Some(best) = find_best_split(sample, &indices, &used) else {
            return self.create_leaf_node(sample, &indices);
        };

        // The best split does not divide the rows.
        if best.left.is_empty() || best.right.is_empty() {
            return self.create_leaf_node(sample, &indices);
        }

        if best.left.len() < min_leaf_size || best.right.len() < min_leaf_size {
            return self.create_leaf_node(sample, &indices);
        }

        let SplitResult { splitter, impurity, left, right } = best;
        debug!(
            "depth {depth}: split {} rows on feature {} at {} \
            ({} left, {} right, gini {impurity})",
            indices.len(),
            splitter.feature,
            splitter.threshold,
            left.len(),
            right.len(),
        );

        used.insert(splitter.feature);
        let left = self.split_node(sample, left, depth + 1, used.clone());
        let right = self.split_node(sample, right, depth + 1, used);

        Box::new(Node::branch(splitter, impurity, left, right))
    }


    /// Construct a leaf node that tallies the labels of `indices`.
    /// A label counts as positive iff it equals `1`.
    fn create_leaf_node(&self, sample: &Sample, indices: &[usize])
        -> Box<Node>
    {
        let n_pos = indices.iter()
            .filter(|&&i| sample.target(i) == 1.0)
            .count();
        let n_neg = indices.len() - n_pos;

        let impurity = match self.config.leaf_impurity {
            LeafImpurity::Zero => 0.0,
            LeafImpurity::Measured => {
                let counts = count_labels(
                    indices.iter().map(|&i| sample.target(i))
                );
                gini_impurity(&counts)
            },
        };

        trace!("leaf: n1 = {n_pos}, n2 = {n_neg}, gini {impurity}");
        Box::new(Node::leaf(n_pos, n_neg, impurity))
    }


    fn root_or_err(&self) -> Result<&Node> {
        self.root.as_deref().ok_or(TreeError::NotBuilt)
    }


    /// Returns the fraction of training rows
    /// that agree with the majority label of the leaf they reach.
    /// The denominator is the number of rows given to `build_tree`.
    pub fn calculate_accuracy(&self) -> Result<f64> {
        let root = self.root_or_err()?;
        let n_sample = self.sample.as_ref()
            .map(|sample| sample.len())
            .ok_or(TreeError::NotBuilt)?;

        Ok(root.n_majority() as f64 / n_sample as f64)
    }


    /// Returns the pre-order dump of the tree, one line per node.
    pub fn render_tree(&self) -> Result<String> {
        let root = self.root_or_err()?;
        Ok(root.to_string())
    }


    /// Prints the pre-order dump of the tree to the standard output.
    pub fn print_tree(&self) {
        let Some(root) = self.root.as_deref() else {
            warn!("print_tree is called before build_tree");
            return;
        };

        let mut dump = String::new();
        if root.write_tree(&mut dump, 0, true).is_ok() {
            print!("{dump}");
        }
    }


    /// Write the current decision tree to dot file.
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let root = self.root_or_err()?;

        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        let info = root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }
}


impl Classifier for DecisionTree {
    fn predict(&self, example: &[f64]) -> Result<i64> {
        self.root_or_err()?.predict(example)
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_depth = self.config.max_depth
            .map(|depth| depth.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        writeln!(
            f,
            "\
            ----------\n\
            # Decision Tree\n\n\
            - Min leaf size: {}\n\
            - Max depth: {max_depth}\n\
            - Leaf impurity: {}\
            ",
            self.config.min_leaf_size,
            self.config.leaf_impurity,
        )?;

        if let Some(root) = self.root.as_deref() {
            writeln!(
                f,
                "- Nodes: {}\n- Leaves: {}\n- Depth: {}",
                root.n_nodes(),
                root.n_leaves(),
                root.depth(),
            )?;
        }

        write!(f, "----------")
    }
}
