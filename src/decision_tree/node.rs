//! Defines the inner representation
//! of the Decision Tree class.
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::Classifier;
use crate::error::Result;
use super::split_rule::*;


const INDENT: &str = "     ";


/// Enumeration of branch nodes and leaf nodes.
/// Each node owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that has two children.
    Branch {
        /// Splitting rule.
        splitter: Splitter,
        /// Weighted Gini score achieved by `splitter`.
        impurity: f64,
        /// Child for `x[feature] <= threshold`.
        left: Box<Node>,
        /// Child for `x[feature] > threshold`.
        right: Box<Node>,
    },


    /// A node that has no children.
    Leaf {
        /// Number of training examples with label `1`.
        n_pos: usize,
        /// Number of the other training examples.
        n_neg: usize,
        /// Reported impurity of this leaf.
        impurity: f64,
    },
}


impl Node {
    /// Construct a branch node from the arguments.
    #[inline]
    pub fn branch(
        splitter: Splitter,
        impurity: f64,
        left: Box<Node>,
        right: Box<Node>,
    ) -> Self
    {
        Self::Branch { splitter, impurity, left, right, }
    }


    /// Construct a leaf node from the arguments.
    #[inline]
    pub fn leaf(n_pos: usize, n_neg: usize, impurity: f64) -> Self {
        Self::Leaf { n_pos, n_neg, impurity, }
    }


    /// Returns `true` for a leaf node.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the impurity stored in this node.
    #[inline]
    pub fn impurity(&self) -> f64 {
        match self {
            Self::Branch { impurity, .. } | Self::Leaf { impurity, .. }
                => *impurity,
        }
    }


    /// Returns the majority label of a leaf node,
    /// ties broken toward `1`.
    /// Returns `None` for a branch node.
    #[inline]
    pub fn class(&self) -> Option<i64> {
        match self {
            Self::Leaf { n_pos, n_neg, .. }
                => Some(if n_pos >= n_neg { 1 } else { 0 }),
            Self::Branch { .. } => None,
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Branch { left, right, .. }
                => left.n_leaves() + right.n_leaves(),
            Self::Leaf { .. } => 1,
        }
    }


    /// Returns the number of nodes of this sub-tree.
    pub fn n_nodes(&self) -> usize {
        match self {
            Self::Branch { left, right, .. }
                => 1 + left.n_nodes() + right.n_nodes(),
            Self::Leaf { .. } => 1,
        }
    }


    /// Returns the depth of this sub-tree.
    /// A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        match self {
            Self::Branch { left, right, .. }
                => 1 + left.depth().max(right.depth()),
            Self::Leaf { .. } => 0,
        }
    }


    /// Returns the leaf that `example` reaches.
    pub fn leaf_of(&self, example: &[f64]) -> Result<&Node> {
        let mut node = self;
        while let Self::Branch { splitter, left, right, .. } = node {
            node = match splitter.split(example)? {
                LeftRight::Left  => left.as_ref(),
                LeftRight::Right => right.as_ref(),
            };
        }
        Ok(node)
    }


    /// Returns the number of training examples
    /// that agree with the majority label of their leaf.
    pub(crate) fn n_majority(&self) -> usize {
        match self {
            Self::Branch { left, right, .. }
                => left.n_majority() + right.n_majority(),
            Self::Leaf { n_pos, n_neg, .. } => *n_pos.max(n_neg),
        }
    }


    /// Writes the pre-order dump of this sub-tree,
    /// one line per node.
    /// If `paint` is `true`, the class names are colored.
    pub(crate) fn write_tree<W>(&self, out: &mut W, depth: usize, paint: bool)
        -> fmt::Result
        where W: fmt::Write
    {
        if depth == 0 {
            out.write_str("Root ")?;
        } else {
            write!(out, "{}|---- ", INDENT.repeat(depth - 1))?;
        }

        match self {
            Self::Branch { splitter, impurity, left, right } => {
                writeln!(
                    out,
                    "Node: Feature {feat} <= {thr}, Gini: {impurity:.4}",
                    feat = splitter.feature,
                    thr = splitter.threshold,
                )?;
                left.write_tree(out, depth + 1, paint)?;
                right.write_tree(out, depth + 1, paint)
            },
            Self::Leaf { n_pos, n_neg, impurity } => {
                let class = if n_pos >= n_neg { "Positive" } else { "Negative" };
                let class = match (paint, n_pos >= n_neg) {
                    (false, _) => class.to_string(),
                    (true, true) => class.green().bold().to_string(),
                    (true, false) => class.red().bold().to_string(),
                };
                writeln!(
                    out,
                    "Leaf: Class = {class} (n1={n_pos}, n2={n_neg}), \
                    Gini: {impurity:.4}"
                )
            },
        }
    }


    pub(crate) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Self::Branch { splitter, left, right, .. } => {
                let splitter = format!(
                    "\tnode_{id} [ label = \"x[{feat}] <= {thr:.2} ?\" ];\n",
                    feat = splitter.feature,
                    thr  = splitter.threshold,
                );

                let left_id = id + 1;
                let (     left,  right_id) = left.to_dot_info(left_id);
                let (mut right, return_id) = right.to_dot_info(right_id);

                let mut info = left;
                info.push(splitter);
                info.append(&mut right);

                let left_edge = format!(
                    "\tnode_{id} -- node_{left_id} [ label = \"Yes\" ];\n",
                );
                info.push(left_edge);
                let right_edge = format!(
                    "\tnode_{id} -- node_{right_id} [ label = \"No\" ];\n",
                );
                info.push(right_edge);

                (info, return_id)
            },
            Self::Leaf { n_pos, n_neg, .. } => {
                let class = if n_pos >= n_neg { 1 } else { 0 };
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{class} ({n_pos}/{n_neg})\", \
                     shape = box \
                     ];\n",
                );

                (vec![info], id + 1)
            }
        }
    }
}


impl Classifier for Node {
    /// Walks from this node down to a leaf
    /// and returns the majority label of that leaf.
    fn predict(&self, example: &[f64]) -> Result<i64> {
        let leaf = self.leaf_of(example)?;
        Ok(leaf.class().unwrap_or(0))
    }
}


impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0, false)
    }
}
