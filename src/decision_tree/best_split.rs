//! Exhaustive search for the split that minimizes the weighted Gini score.
use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use crate::Sample;
use super::criterion::*;
use super::split_rule::Splitter;


/// The best candidate found while searching one node's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// The chosen rule.
    pub splitter: Splitter,
    /// Weighted Gini score of the split.
    pub impurity: f64,
    /// Rows with `x[feature] <= threshold`.
    pub left: Vec<usize>,
    /// Rows with `x[feature] > threshold`.
    pub right: Vec<usize>,
}


/// Returns the split of the rows `indices` of `sample`
/// that minimizes the weighted Gini score.
///
/// Every feature not in `used` is tried,
/// and every distinct value of it over `indices` is a candidate threshold.
/// Ties go to the candidate seen first,
/// scanning features and thresholds in ascending order.
///
/// Returns `None` if `indices` is empty or every feature is in `used`.
/// Note that the returned split may still send every row to one side;
/// the caller decides whether such a split is usable.
pub fn find_best_split(
    sample: &Sample,
    indices: &[usize],
    used: &FixedBitSet,
) -> Option<SplitResult>
{
    if indices.is_empty() { return None; }

    // `reduce_with` keeps the order of features,
    // so keeping `a` on ties picks the smaller feature index.
    let (feature, threshold, impurity) = (0..sample.n_feature())
        .into_par_iter()
        .filter(|&feature| !used.contains(feature))
        .filter_map(|feature| {
            best_threshold(sample, indices, feature)
                .map(|(threshold, score)| (feature, threshold, score))
        })
        .reduce_with(|a, b| if b.2 < a.2 { b } else { a })?;

    let splitter = Splitter::new(feature, threshold);
    let (left, right) = splitter.partition(sample, indices);

    Some(SplitResult { splitter, impurity, left, right, })
}


/// Returns the pair `(threshold, score)` that minimizes
/// the weighted Gini score over the thresholds of `feature`.
fn best_threshold(sample: &Sample, indices: &[usize], feature: usize)
    -> Option<(f64, f64)>
{
    let pairs = indices.iter()
        .map(|&i| (sample.row(i)[feature], sample.target(i)))
        .collect::<Vec<_>>();
    sweep_thresholds(pairs)
}


/// Sweeps the `(value, label)` pairs in ascending order of the value;
/// each distinct value moves its rows from the right tally to the left one.
/// Every step consumes at least one pair.
fn sweep_thresholds(mut pairs: Vec<(f64, f64)>) -> Option<(f64, f64)> {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut left = LabelToCount::new();
    let mut right = count_labels(pairs.iter().map(|&(_, y)| y));

    let mut best: Option<(f64, f64)> = None;
    let mut k = 0;
    while k < pairs.len() {
        let threshold = pairs[k].0;
        while k < pairs.len() && goes_left(pairs[k].0, threshold) {
            let y = pairs[k].1 as i64;
            *left.entry(y).or_insert(0) += 1;
            if let Some(count) = right.get_mut(&y) {
                *count -= 1;
                if *count == 0 { right.remove(&y); }
            }
            k += 1;
        }

        let score = weighted_gini(&[&left, &right]);
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((threshold, score));
        }
    }

    best
}


// `total_cmp` keeps the run non-empty for `NaN` thresholds.
#[inline]
fn goes_left(value: f64, threshold: f64) -> bool {
    value <= threshold || value.total_cmp(&threshold).is_le()
}
