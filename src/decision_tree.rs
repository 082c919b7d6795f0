//! The CART decision tree for binary classification.

/// Defines the decision tree and its growing procedure.
pub mod decision_tree_algorithm;
/// Defines the builder and the parameters of `DecisionTree`.
pub mod builder;
/// Defines Gini impurity.
pub mod criterion;
/// Defines the exhaustive split search.
pub mod best_split;
/// Defines the split rule of branch nodes.
pub mod split_rule;

/// Defines the nodes of `DecisionTree`.
mod node;


pub use decision_tree_algorithm::DecisionTree;
pub use builder::{
    DecisionTreeBuilder,
    LeafImpurity,
    TreeConfig,
    DEFAULT_MIN_LEAF_SIZE,
};
pub use criterion::{
    LabelToCount,
    count_labels,
    gini_impurity,
    weighted_gini,
};
pub use best_split::{SplitResult, find_best_split};
pub use split_rule::{LeftRight, Splitter};
pub use node::Node;
