//! A trait for binary classifiers over numeric examples.
use crate::Sample;
use crate::error::Result;


/// A trait that defines the behavior of a binary classifier.
/// You only need to implement `predict` method.
///
/// Labels are `0` or `1`.
pub trait Classifier {
    /// Predicts the label of the given feature vector.
    fn predict(&self, example: &[f64]) -> Result<i64>;


    /// Predicts the label of the `row`'th example of `sample`.
    fn predict_row(&self, sample: &Sample, row: usize) -> Result<i64> {
        self.predict(sample.features(row))
    }


    /// Predicts the labels of all examples in `sample`.
    fn predict_all(&self, sample: &Sample) -> Result<Vec<i64>> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict_row(sample, row))
            .collect::<Result<Vec<_>>>()
    }


    /// Returns the fraction of examples in `sample`
    /// whose prediction agrees with the label.
    /// A label counts as positive iff it equals `1`.
    fn accuracy_on(&self, sample: &Sample) -> Result<f64> {
        let predictions = self.predict_all(sample)?;
        let n_sample = predictions.len();
        let correct = predictions.into_iter()
            .zip(sample.targets())
            .filter(|&(p, y)| (p == 1) == (y == 1.0))
            .count();

        Ok(correct as f64 / n_sample as f64)
    }
}
