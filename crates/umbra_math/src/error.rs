//! Error types for the math crate.

use thiserror::Error;

/// Errors raised by checked matrix construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type MathResult<T> = Result<T, MathError>;
