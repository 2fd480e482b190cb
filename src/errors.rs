//! Errors
//!
//! Custom error types used throughout the `scorenorm` crate.
use thiserror::Error;

/// Errors that can occur while learning or applying a score normalizer.
#[derive(Debug, Error)]
pub enum ScorenormError {
    /// Too few samples for an operation.
    #[error("Not enough samples for {0}, at least {1} are required.")]
    InsufficientData(String, usize),
    /// The score axis collapsed to a point or an empty interval.
    #[error("Degenerate score range: {0}.")]
    DegenerateRange(String),
    /// A NaN or otherwise unusable score value.
    #[error("Invalid score value {0} passed to {1}.")]
    InvalidScore(f64, String),
    /// The posterior curve cannot be inverted.
    #[error("The learned probability curve is not strictly monotone, scores cannot be recovered from probabilities.")]
    NonMonotoneInverse,
    /// No decision threshold satisfies the requested recall.
    #[error("No decision threshold reaches a recall above {0}.")]
    UnreachableRecall(f64),
    /// The normalizer has not been fit yet.
    #[error("The normalizer must be fit before calling {0}.")]
    NotFitted(String),
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}
