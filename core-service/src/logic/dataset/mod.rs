//! Dataset Module - labelled training data
//!
//! A training table is validated against the feature schema before any row
//! is accepted. Missing columns are a schema error and unparseable cells a
//! format error; nothing is dropped silently.

pub mod record;
pub mod csv;

#[cfg(test)]
mod tests;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::logic::features::{validate_columns, FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT, TARGET_NAME};

pub use record::{PreviewRow, TrainingRow};
pub use self::csv::parse_csv;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingDataset {
    rows: Vec<TrainingRow>,
}

impl TrainingDataset {
    pub fn from_rows(rows: Vec<TrainingRow>) -> Self {
        Self { rows }
    }

    /// Build from a named-column table (e.g. parsed CSV).
    ///
    /// Columns outside the schema are ignored.
    pub fn from_table<S: AsRef<str>>(columns: &[S], table: &[Vec<f64>]) -> Result<Self> {
        validate_columns(columns)?;

        let position = |name: &str| {
            columns
                .iter()
                .position(|c| c.as_ref() == name)
                .ok_or_else(|| Error::DataFormat(format!("column '{name}' vanished")))
        };

        let mut feature_positions = [0usize; FEATURE_COUNT];
        for (slot, name) in feature_positions.iter_mut().zip(FEATURE_LAYOUT) {
            *slot = position(name)?;
        }
        let target_position = position(TARGET_NAME)?;

        let mut rows = Vec::with_capacity(table.len());
        for (row_number, cells) in table.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(Error::DataFormat(format!(
                    "row {} has {} values, expected {}",
                    row_number + 1,
                    cells.len(),
                    columns.len()
                )));
            }

            let values: [f64; FEATURE_COUNT] = std::array::from_fn(|i| cells[feature_positions[i]]);
            rows.push(TrainingRow::new(
                FeatureVector::from_values(values),
                cells[target_position],
            ));
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    /// Row-major `n x FEATURE_COUNT` matrix in layout order
    pub fn feature_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows.len(), FEATURE_COUNT), |(r, c)| {
            self.rows[r].features.values[c]
        })
    }

    pub fn targets(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.strength_28d).collect()
    }
}
