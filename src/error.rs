//! Error types for NTRU operations

use thiserror::Error;

/// Errors produced when decoding or validating external data.
///
/// Arithmetic failure modes that are expected during sampling, such as a
/// candidate polynomial not being invertible, are modeled as `Option`
/// rather than errors; callers resample instead of failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NtruError {
    /// Input bytes are too short or otherwise not a valid encoding
    #[error("malformed encoding: {0}")]
    MalformedEncoding(&'static str),

    /// The coefficient sequence cannot be represented in this encoding
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    /// A parameter set failed validation
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),
}

/// Result type for NTRU operations
pub type Result<T> = std::result::Result<T, NtruError>;
