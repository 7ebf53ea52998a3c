//! Rectangular grids of normalized scalars.
//!
//! A [`DataGrid`] is created once per load and never mutated afterwards; a new
//! load replaces it wholesale.

use crate::error::{Error, Result};
use trueno::Vector;

/// Immutable rectangular 2D array of scalars, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGrid {
    /// Values in row-major order.
    values: Vec<f32>,
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
}

/// Summary statistics over a grid's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Smallest value.
    pub min: f32,
    /// Largest value.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
}

impl DataGrid {
    /// Build a grid from rows, validating that it is rectangular.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for a grid without cells and
    /// [`Error::InvalidGrid`] when a row length differs from the first row.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::EmptyData);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(Error::InvalidGrid {
                row,
                expected: width,
                found,
            });
        }

        let values = rows.into_iter().flatten().collect();
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Build a grid from row-major values.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or do not match the data length.
    pub fn from_values(values: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || values.is_empty() {
            return Err(Error::EmptyData);
        }
        if values.len() != width * height {
            return Err(Error::InvalidGrid {
                row: values.len() / width,
                expected: width,
                found: values.len() % width,
            });
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Parse a grid from a JSON 2D numeric array.
    ///
    /// Ragged payloads are rejected; nothing is partially adopted.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the grid is not rectangular.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<Vec<f32>> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// Serialize the grid as a JSON 2D numeric array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows().collect::<Vec<_>>())?)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Value at column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    /// Row `y` as a slice.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.values[start..start + self.width])
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.width)
    }

    /// Copy out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }

    /// Raw row-major values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Min, max and mean computed with trueno's SIMD reductions.
    #[must_use]
    pub fn stats(&self) -> GridStats {
        let vec = Vector::from_vec(self.values.clone());

        GridStats {
            min: vec.min().unwrap_or(0.0),
            max: vec.max().unwrap_or(1.0),
            mean: vec.mean().unwrap_or(0.5),
        }
    }
}
