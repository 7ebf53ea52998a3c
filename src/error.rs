//! Error types for trueno-heatmap operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-heatmap operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// JSON payload could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid dimensions for framebuffer or crop.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Grid rows do not all have the same length.
    #[error("Invalid grid: row {row} has {found} values, expected {expected}")]
    InvalidGrid {
        /// Index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Color table is empty or malformed.
    #[error("Invalid color table: {0}")]
    InvalidColorTable(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Requested region does not fit inside the grid.
    #[error("Region ({xs},{ys})-({xe},{ye}) is outside a {width}x{height} grid")]
    RegionOutOfBounds {
        /// Left column.
        xs: usize,
        /// Top row.
        ys: usize,
        /// Right column (inclusive).
        xe: usize,
        /// Bottom row (inclusive).
        ye: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Data source name could not be resolved.
    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    /// Control-surface command could not be parsed.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Pan direction could not be parsed.
    #[error("Unknown pan direction: {0}")]
    UnknownDirection(String),

    /// Export format could not be parsed.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_invalid_grid_mentions_row() {
        let err = Error::InvalidGrid {
            row: 3,
            expected: 10,
            found: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("10"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_config_parse_includes_line() {
        let err = Error::ConfigParse {
            line: 4,
            message: "bad value".to_string(),
        };
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_json_from_conversion() {
        let json_err = serde_json::from_str::<Vec<f32>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
