//! Numeric data tables with per-column statistics.

use crate::error::{Result, SomError};
use rand::Rng;
use std::io::{BufRead, Read};

/// A two-dimensional numeric table with per-column statistics.
///
/// Missing values are represented as `f64::NAN` and are excluded from the
/// min/max statistics. The table is immutable after construction; deriving a
/// column sub-range recomputes all statistics from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    data: Vec<Vec<f64>>,
    rows: usize,
    columns: usize,
    minimums: Vec<f64>,
    maximums: Vec<f64>,
    minimum: f64,
    maximum: f64,
    has_missing: bool,
}

impl DataTable {
    /// Creates a table from rows, validating that all rows have the same
    /// width and computing column statistics.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self> {
        let rows = data.len();
        let columns = data.first().map(|r| r.len()).unwrap_or(0);

        if rows == 0 || columns == 0 {
            return Err(SomError::EmptyTable);
        }

        for (i, row) in data.iter().enumerate() {
            if row.len() != columns {
                return Err(SomError::MalformedInput {
                    row: i,
                    expected: columns,
                    actual: row.len(),
                });
            }
        }

        let mut minimums = vec![f64::NAN; columns];
        let mut maximums = vec![f64::NAN; columns];
        let mut has_missing = false;

        for col in 0..columns {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut seen = false;

            for row in &data {
                let value = row[col];
                if value.is_nan() {
                    has_missing = true;
                } else {
                    min = min.min(value);
                    max = max.max(value);
                    seen = true;
                }
            }

            if seen {
                minimums[col] = min;
                maximums[col] = max;
            }
        }

        let minimum = minimums.iter().copied().filter(|v| !v.is_nan()).fold(f64::INFINITY, f64::min);
        let maximum = maximums.iter().copied().filter(|v| !v.is_nan()).fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            data,
            rows,
            columns,
            minimums,
            maximums,
            minimum,
            maximum,
            has_missing,
        })
    }

    /// Reads comma-separated values, one row per line.
    ///
    /// Tokens that do not parse as numbers become missing values (NaN); blank
    /// lines are skipped. Rows of inconsistent width are rejected.
    pub fn from_csv<R: BufRead>(reader: R) -> Result<Self> {
        let mut data = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row: Vec<f64> = line
                .split(',')
                .map(|token| token.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();

            data.push(row);
        }

        Self::from_rows(data)
    }

    /// Reads a JSON array of numeric arrays.
    ///
    /// Non-numeric entries (including `null`) become missing values.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let raw: Vec<Vec<serde_json::Value>> = serde_json::from_reader(reader)?;

        let data = raw
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect())
            .collect();

        Self::from_rows(data)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns a row by index, if it exists.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Returns the per-column minimums (NaN for all-missing columns).
    #[inline]
    pub fn minimums(&self) -> &[f64] {
        &self.minimums
    }

    /// Returns the per-column maximums (NaN for all-missing columns).
    #[inline]
    pub fn maximums(&self) -> &[f64] {
        &self.maximums
    }

    /// Returns the smallest value in the table.
    #[inline]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Returns the largest value in the table.
    #[inline]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Returns true if any cell holds a missing value.
    #[inline]
    pub fn has_missing(&self) -> bool {
        self.has_missing
    }

    /// Returns one row chosen uniformly at random.
    pub fn random_row<R: Rng>(&self, rng: &mut R) -> &[f64] {
        &self.data[rng.gen_range(0..self.rows)]
    }

    /// Builds a new table from the contiguous column slice
    /// `[start, start + length)` of every row, with statistics recomputed.
    pub fn sub_range(&self, start: usize, length: usize) -> Result<Self> {
        if length == 0 || start + length > self.columns {
            return Err(SomError::InvalidColumnRange {
                start,
                length,
                columns: self.columns,
            });
        }

        let data = self
            .data
            .iter()
            .map(|row| row[start..start + length].to_vec())
            .collect();

        Self::from_rows(data)
    }
}
