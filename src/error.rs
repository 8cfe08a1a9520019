//! Error types for grafica operations.

use crate::chart::Channel;
use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while specifying or rendering a chart.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Dataset has no records to render.
    #[error("Empty dataset: no records to render")]
    EmptyDataset,

    /// A mapping references a column absent from the dataset schema.
    #[error("Invalid mapping: {channel} is mapped to unknown column {column:?}")]
    InvalidMapping {
        /// Channel whose mapping is invalid.
        channel: Channel,
        /// The missing column name.
        column: String,
    },

    /// A channel requiring numeric data was mapped to a categorical column.
    #[error("Type mismatch: {channel} requires a numeric column, but {column:?} is categorical")]
    TypeMismatch {
        /// Channel with the wrong value kind.
        channel: Channel,
        /// The offending column name.
        column: String,
    },

    /// A geometry is missing a positional channel it requires.
    #[error("Missing channel: {channel} must be mapped for this geometry")]
    MissingChannel {
        /// The unmapped channel.
        channel: Channel,
    },

    /// A row pushed onto a dataset does not match the established schema.
    #[error("Schema mismatch: row field {column:?} does not match the dataset schema")]
    SchemaMismatch {
        /// The offending field name.
        column: String,
    },

    /// Scale domain error (e.g., log transform over a non-positive extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mapping_display() {
        let err = Error::InvalidMapping {
            channel: Channel::X,
            column: "wt".to_string(),
        };
        assert!(err.to_string().contains("unknown column"));
        assert!(err.to_string().contains("wt"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = Error::TypeMismatch {
            channel: Channel::Size,
            column: "cyl".to_string(),
        };
        assert!(err.to_string().contains("numeric"));
        assert!(err.to_string().contains("cyl"));
    }

    #[test]
    fn test_empty_dataset_display() {
        assert!(Error::EmptyDataset.to_string().contains("no records"));
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 600,
        };
        assert!(err.to_string().contains("0x600"));
    }
}
