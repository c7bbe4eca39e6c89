//! Error types for floodgrid

use thiserror::Error;

/// Main error type for floodgrid operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid raster dimensions: {rows}x{cols} for {len} values")]
    InvalidDimensions { rows: usize, cols: usize, len: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Convenience constructor for `InvalidParameter`
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for floodgrid operations
pub type Result<T> = std::result::Result<T, Error>;
