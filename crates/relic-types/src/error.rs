//! Error types for identifier parsing.

use thiserror::Error;

/// Errors from parsing identifier types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded input had the wrong length.
    #[error("invalid id length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
