//! # Tensor Shape
//!
//! Shape inspection and tensor containers for time series payloads.
//! This crate knows nothing about models or requests: it measures nested
//! numeric arrays and holds the typed forms a validated payload can take.

use thiserror::Error;

pub mod profile;
pub mod series;

pub use crate::profile::{inspect, ShapeProfile};
pub use crate::series::{CanonicalTensor, SeriesInput};

/// Errors that can occur while building tensors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Ragged input: {0}")]
    Ragged(String),

    #[error("Non-finite value at {0}")]
    NonFinite(String),
}

/// Result type for shape operations
pub type Result<T> = std::result::Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShapeError::Ragged("row 1 has 2 columns, expected 3".to_string());
        assert_eq!(err.to_string(), "Ragged input: row 1 has 2 columns, expected 3");
    }
}
