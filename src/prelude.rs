//! Exports the decision tree, the sample types, and the traits.
//! 
pub use crate::sample::{
    Sample,
    SampleReader,
};


pub use crate::classifier::Classifier;


pub use crate::decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    LeafImpurity,
    TreeConfig,
    Node,
    Splitter,
    LeftRight,
};


pub use crate::error::TreeError;
