use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;

use log::debug;
use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{Result, TreeError};


/// Struct `Sample` holds a batch sample as a table of rows.
/// Every row has the same length;
/// all but the last value are features,
/// the last value is the binary label.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(super) rows: Vec<Vec<f64>>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a [`Sample`] from rows of the form
    /// `[x_0, x_1, ..., x_{d-1}, y]`.
    ///
    /// Returns `Err` if `rows` is empty,
    /// if the first row has no feature column,
    /// if some row has a different length from the first one,
    /// or if some cell is `NaN` or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => {
                return Err(TreeError::InsufficientData(
                    "the sample has no rows".to_string()
                ));
            },
        };

        if width < 2 {
            return Err(TreeError::InsufficientData(format!(
                "each row needs at least one feature and a label, \
                got {width} column(s)"
            )));
        }

        let ragged = rows.iter()
            .enumerate()
            .find(|(_, row)| row.len() != width);
        if let Some((row, r)) = ragged {
            return Err(TreeError::RaggedRow {
                row, expected: width, found: r.len(),
            });
        }

        let non_finite = rows.iter()
            .enumerate()
            .find_map(|(row, r)| {
                r.iter().position(|v| !v.is_finite()).map(|column| (row, column))
            });
        if let Some((row, column)) = non_finite {
            return Err(TreeError::NonFinite { row, column, });
        }

        let n_sample = rows.len();
        let n_feature = width - 1;
        Ok(Self { rows, n_sample, n_feature, })
    }


    /// Read a delimited text file to [`Sample`] type.
    /// This method returns `Err` if the file does not exist
    /// or contains a non-numerical cell.
    ///
    /// If `has_header` is `true`, the first line is skipped.
    /// Empty lines are skipped.
    pub fn from_csv<P>(file: P, has_header: bool, delimiter: char)
        -> Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header, delimiter)
    }


    /// Read a delimited text from [`BufRead`].
    pub fn from_reader<R>(reader: R, has_header: bool, delimiter: char)
        -> Result<Self>
        where R: BufRead,
    {
        let mut lines = reader.lines().enumerate();
        if has_header {
            if let Some((_, header)) = lines.next() {
                header?;
            }
        }

        let mut rows = Vec::new();
        for (i, line) in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let row = line.split(delimiter)
                .map(|cell| {
                    let cell = cell.trim();
                    cell.parse::<f64>()
                        .map_err(|_| TreeError::Parse {
                            line: i + 1,
                            cell: cell.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(row);
        }

        debug!("read {} rows from a delimited text", rows.len());
        Self::from_rows(rows)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// Each column of `data` becomes a feature (in column order)
    /// and `target` becomes the trailing label.
    /// Every column must be castable to `f64` and free of nulls.
    pub fn from_dataframe(data: &DataFrame, target: &Series)
        -> Result<Self>
    {
        let (n_sample, _) = data.shape();
        if target.len() != n_sample {
            return Err(TreeError::InsufficientData(format!(
                "the target has {} values, but the data has {n_sample} rows",
                target.len(),
            )));
        }

        let mut columns = data.get_columns()
            .par_iter()
            .map(column_to_vec)
            .collect::<Result<Vec<_>>>()?;
        columns.push(column_to_vec(target)?);

        let rows = (0..n_sample).map(|i| {
                columns.iter()
                    .map(|column| column[i])
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        Self::from_rows(rows)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the number of examples.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_sample
    }


    /// Always `false` for a constructed sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns the number of features.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Returns the `i`'th row, label included.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i][..]
    }


    /// Returns the feature values of the `i`'th row.
    #[inline]
    pub fn features(&self, i: usize) -> &[f64] {
        &self.rows[i][..self.n_feature]
    }


    /// Returns the label of the `i`'th row.
    #[inline]
    pub fn target(&self, i: usize) -> f64 {
        self.rows[i][self.n_feature]
    }


    /// Returns all rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows[..]
    }


    /// Returns an iterator over the labels.
    pub fn targets(&self) -> impl Iterator<Item = f64> + '_ {
        let d = self.n_feature;
        self.rows.iter().map(move |row| row[d])
    }
}


fn column_to_vec(series: &Series) -> Result<Vec<f64>> {
    let casted = series.cast(&DataType::Float64)?;
    casted.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| TreeError::MissingValue {
                column: series.name().to_string(),
                row,
            })
        })
        .collect()
}


impl Index<usize> for Sample {
    type Output = [f64];


    fn index(&self, i: usize) -> &Self::Output {
        self.row(i)
    }
}
