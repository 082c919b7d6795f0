use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::Result;
use super::decision_tree_algorithm::DecisionTree;


/// The minimal leaf size set as default.
pub const DEFAULT_MIN_LEAF_SIZE: usize = 5;


/// How a leaf reports its impurity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafImpurity {
    /// The Gini impurity of the labels that reached the leaf.
    #[default]
    Measured,
    /// Always `0`, whatever the label mixture is.
    Zero,
}


impl fmt::Display for LeafImpurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Measured => "Measured Gini impurity",
            Self::Zero => "Fixed to zero",
        };

        write!(f, "{name}")
    }
}


/// Parameters for growing a [`DecisionTree`].
/// Missing fields take their default values when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// A subset of at most `min_leaf_size` rows becomes a leaf,
    /// and no split may create a child smaller than this.
    pub min_leaf_size: usize,
    /// Nodes at this depth become leaves.
    /// `None` grows the tree until the other rules stop it.
    pub max_depth: Option<usize>,
    /// How leaves report their impurity.
    pub leaf_impurity: LeafImpurity,
}


impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            max_depth: None,
            leaf_impurity: LeafImpurity::default(),
        }
    }
}


impl TreeConfig {
    /// Read a configuration from a JSON string such as
    /// `{"min_leaf_size": 2, "max_depth": 4}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str::<Self>(json)?;
        Ok(config)
    }


    /// Dump this configuration as a JSON string.
    pub fn json_dump(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }
}


/// A struct that builds [`DecisionTree`].
/// `DecisionTreeBuilder` keeps parameters for constructing [`DecisionTree`].
///
/// # Example
///
/// ```
/// use minicart::prelude::*;
///
/// let tree = DecisionTreeBuilder::new()
///     .min_leaf_size(2)
///     .max_depth(3)
///     .leaf_impurity(LeafImpurity::Zero)
///     .build();
/// assert!(!tree.is_built());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeBuilder {
    config: TreeConfig,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// min_leaf_size: DEFAULT_MIN_LEAF_SIZE == 5,
    /// max_depth: None,
    /// leaf_impurity: LeafImpurity::Measured,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Start from the given configuration.
    pub fn from_config(config: TreeConfig) -> Self {
        Self { config }
    }


    /// Set the minimal leaf size.
    /// Default is `5`.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.config.min_leaf_size = size;
        self
    }


    /// Specify the maximal depth of the tree.
    /// By default, the depth is not limited.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }


    /// Set how leaves report their impurity.
    /// Default value is `LeafImpurity::Measured`.
    pub fn leaf_impurity(mut self, leaf_impurity: LeafImpurity) -> Self {
        self.config.leaf_impurity = leaf_impurity;
        self
    }


    /// Build an empty [`DecisionTree`].
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_config(self.config)
    }
}
