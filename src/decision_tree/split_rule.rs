//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};

use crate::Sample;
use crate::error::{Result, TreeError};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// `x[feature] <= threshold`.
    Left,
    /// `x[feature] > threshold`.
    Right,
}


/// A split rule `x[feature] <= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    /// Index of the feature this rule looks at.
    pub feature: usize,
    /// Examples whose feature value is at most `threshold` go left.
    pub threshold: f64,
}


impl Splitter {
    /// Construct the rule `x[feature] <= threshold`.
    #[inline]
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold, }
    }


    /// Defines the splitting.
    /// Returns `Err` if `example` has no value at `self.feature`.
    #[inline]
    pub fn split(&self, example: &[f64]) -> Result<LeftRight> {
        let value = example.get(self.feature)
            .ok_or(TreeError::FeatureIndexOutOfRange {
                index: self.feature,
                len: example.len(),
            })?;

        Ok(self.side(*value))
    }


    #[inline]
    pub(crate) fn side(&self, value: f64) -> LeftRight {
        if value <= self.threshold { LeftRight::Left } else { LeftRight::Right }
    }


    /// Splits `indices` into the rows going left and the rows going right.
    /// The relative order of `indices` is kept on both sides.
    pub(crate) fn partition(&self, sample: &Sample, indices: &[usize])
        -> (Vec<usize>, Vec<usize>)
    {
        let mut left = Vec::new();
        let mut right = Vec::new();
        for &i in indices {
            match self.side(sample.row(i)[self.feature]) {
                LeftRight::Left  => { left.push(i); },
                LeftRight::Right => { right.push(i); },
            }
        }
        (left, right)
    }
}
