//! Gini impurity and the weighted Gini score of a split.
use std::collections::BTreeMap;


/// This is an alias from label of type `i64`
/// to the number of examples with that label.
/// Labels are bucketed by `y as i64`.
/// The map is ordered so that summations are reproducible.
pub type LabelToCount = BTreeMap<i64, usize>;


/// Counts the labels given by `labels`.
#[inline]
pub fn count_labels<I>(labels: I) -> LabelToCount
    where I: IntoIterator<Item = f64>
{
    let mut counter = LabelToCount::new();
    for y in labels {
        *counter.entry(y as i64).or_insert(0) += 1;
    }
    counter
}


/// Returns the gini-impurity `1 - Σ p²` of the given tally.
/// An empty tally has impurity `0`.
#[inline]
pub fn gini_impurity(counts: &LabelToCount) -> f64 {
    let total = counts.values().sum::<usize>();
    if total == 0 { return 0.0; }

    let total = total as f64;
    let correct = counts.values()
        .map(|&c| (c as f64 / total).powi(2))
        .sum::<f64>();

    (1.0 - correct).max(0.0)
}


/// Returns the size-weighted sum of the gini-impurities of `subsets`.
/// Empty subsets contribute nothing.
/// If every subset is empty, the score is `0`;
/// callers must not treat such a partition as a valid split.
#[inline]
pub fn weighted_gini(subsets: &[&LabelToCount]) -> f64 {
    let sizes = subsets.iter()
        .map(|counts| counts.values().sum::<usize>())
        .collect::<Vec<_>>();
    let total = sizes.iter().sum::<usize>();
    if total == 0 { return 0.0; }

    let total = total as f64;
    subsets.iter()
        .zip(sizes)
        .filter(|(_, size)| *size > 0)
        .map(|(counts, size)| gini_impurity(counts) * (size as f64 / total))
        .sum::<f64>()
}
