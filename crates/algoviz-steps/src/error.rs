//! Error types for algoviz-steps.

use thiserror::Error;

use crate::algorithm::{Algorithm, InputShape};

/// Result type for step generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating steps.
///
/// Bad user input never lands here; it becomes a single explanatory step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The algorithm was wired to an input of the wrong shape.
    #[error("invalid configuration: {algorithm} expects {expected} input, got {actual}")]
    InvalidConfiguration {
        algorithm: Algorithm,
        expected: InputShape,
        actual: InputShape,
    },
}
