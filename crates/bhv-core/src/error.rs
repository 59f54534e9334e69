//! Error types for hypervector operations.

use thiserror::Error;

/// Errors that can occur when constructing hypervectors from external data.
#[derive(Error, Debug, Clone)]
pub enum BhvError {
    #[error("Invalid vector size: expected {expected} bytes, got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
}
