//! # Error Types
//!
//! Errors raised while parsing primitives.

use thiserror::Error;

/// Errors that can occur when building an [`crate::Address`] from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input had the wrong number of bytes.
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input was not valid hex.
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),
}
