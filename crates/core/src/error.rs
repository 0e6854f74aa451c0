//! Error types for phenomask

use thiserror::Error;

/// Main error type for phenomask operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("No profiled row at index {row}")]
    RowNotFound { row: usize },

    #[error("Row {row} has {count} foreground pixels, fewer than the required {min_length}")]
    RowTooShort {
        row: usize,
        count: usize,
        min_length: usize,
    },

    #[error("Invalid row position: {value}")]
    InvalidPosition { value: String },

    #[error("Invalid quantile: chunk {index} of {total}")]
    InvalidQuantile { total: usize, index: usize },

    #[error("Profile has no foreground rows")]
    EmptyProfile,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for phenomask operations
pub type Result<T> = std::result::Result<T, Error>;
