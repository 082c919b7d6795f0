#![warn(missing_docs)]

//! 
//! A crate that provides a binary CART decision tree.
//! 
//! The tree is grown greedily on a table of numeric rows
//! whose last column is a `0/1` label.
//! At each node, every unused feature and every distinct value of it
//! is tried as a split `x[feature] <= threshold`,
//! and the one with the lowest weighted Gini impurity is kept.
//! 
//! - [`Sample`] holds the table,
//!     read from a delimited text file by [`SampleReader`]
//!     or converted from a `polars::DataFrame`.
//! - [`DecisionTree`] grows the tree and evaluates it.
//!     Its parameters are set by [`DecisionTreeBuilder`]
//!     or read from JSON as a [`TreeConfig`].
//! - [`Classifier`] predicts labels of new examples.
//! 
//! # Example
//! ```no_run
//! use minicart::prelude::*;
//! 
//! let sample = SampleReader::new()
//!     .file("/path/to/data/file.csv")
//!     .has_header(true)
//!     .read()
//!     .unwrap();
//! 
//! let mut tree = DecisionTree::new(5);
//! tree.build_tree(&sample).unwrap();
//! tree.print_tree();
//! 
//! let accuracy = tree.calculate_accuracy().unwrap();
//! println!("Accuracy of the Decision Tree: {}%", accuracy * 100.0);
//! ```

pub mod error;
pub mod sample;
pub mod classifier;
pub mod decision_tree;
pub mod prelude;


pub use error::{Result, TreeError};
pub use sample::{Sample, SampleReader};
pub use classifier::Classifier;
pub use decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    LeafImpurity,
    Node,
    TreeConfig,
};
