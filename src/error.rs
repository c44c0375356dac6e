//! Error types for evalviz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing metrics or rendering plots.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Length mismatch between two aligned vectors.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of the first vector.
        x_len: usize,
        /// Length of the second vector.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Labels passed to a binary metric take more than two distinct values.
    #[error("Binary labels expected, found {distinct} distinct values")]
    NotBinary {
        /// Number of distinct label values seen (capped at 3).
        distinct: usize,
    },

    /// A binary label is neither a recognized positive nor negative value.
    #[error("Unknown binary label at index {index}: expected {{0, 1}}, {{-1, 1}} or booleans")]
    UnknownLabel {
        /// Position of the offending label.
        index: usize,
    },

    /// A score is NaN or infinite.
    #[error("Non-finite score at index {index}")]
    NonFiniteScore {
        /// Position of the offending score.
        index: usize,
    },

    /// The metric is undefined for the given input (e.g. single-class labels).
    #[error("Undefined metric: {0}")]
    UndefinedMetric(String),

    /// Scale domain error (e.g. equal domain bounds).
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
    fn test_error_display() {
        let err = Error::InvalidDimensions { width: 0, height: 100 };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch { x_len: 10, y_len: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_unknown_label_display() {
        let err = Error::UnknownLabel { index: 4 };
        assert_eq!(
            err.to_string(),
            "Unknown binary label at index 4: expected {0, 1}, {-1, 1} or booleans"
        );
    }

    #[test]
    fn test_not_binary_display() {
        let err = Error::NotBinary { distinct: 3 };
        assert_eq!(err.to_string(), "Binary labels expected, found 3 distinct values");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
