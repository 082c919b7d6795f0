//! Errors
//!
//! Custom error types used throughout the `minicart` crate.
use thiserror::Error;


/// Errors that can occur while reading a sample,
/// building a tree, or predicting with it.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The sample is empty or has no feature column.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A row whose length differs from the first row.
    #[error("Row {row} has {found} columns, but {expected} columns are expected.")]
    RaggedRow {
        /// Row position (0-indexed) in the sample.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A `NaN` or infinite cell.
    #[error("Row {row} has a non-finite value at column {column}.")]
    NonFinite {
        /// Row position (0-indexed) in the sample.
        row: usize,
        /// Column position (0-indexed), the label being the last column.
        column: usize,
    },

    /// The tree refers to a feature the given example does not have.
    #[error("Feature index {index} is out of range for an example with {len} values.")]
    FeatureIndexOutOfRange {
        /// Feature index stored in the branch node.
        index: usize,
        /// Length of the example passed to `predict`.
        len: usize,
    },

    /// `predict` or an evaluation was called before `build_tree`.
    #[error("The decision tree has not been built yet. Call `build_tree` first.")]
    NotBuilt,

    /// A cell that cannot be read as a number.
    #[error("Cannot parse `{cell}` on line {line} as a number.")]
    Parse {
        /// Line number (1-indexed) in the input file.
        line: usize,
        /// The raw cell.
        cell: String,
    },

    /// A null value in a data frame column.
    #[error("Column `{column}` has a missing value at row {row}.")]
    MissingValue {
        /// Column name.
        column: String,
        /// Row position (0-indexed).
        row: usize,
    },

    /// Unable to read the configuration.
    #[error("Unable to read the tree configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O failure while reading a sample.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure reported by `polars`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}


/// Result type of this crate.
pub type Result<T> = std::result::Result<T, TreeError>;
