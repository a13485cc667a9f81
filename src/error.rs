use std::error::Error;
use std::fmt;

/// Errors surfaced by the transformers in this crate.
///
/// Every failure is immediate and terminal for the call that produced it;
/// nothing is retried or swallowed internally.
#[derive(Debug, Clone, PartialEq)]
pub enum PcaError {
    /// A component count of zero was requested at construction.
    InvalidComponentCount(usize),
    /// Input data had an unusable shape; the message names the offending
    /// dimensions.
    InvalidInput(String),
    /// Fit was given fewer than two observations, so the sample-variance
    /// denominator `n - 1` would be zero.
    TooFewSamples(usize),
    /// Transform was called before any successful fit.
    NotFitted,
    /// The underlying matrix decomposition failed.
    Decomposition(String),
}

impl fmt::Display for PcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcaError::InvalidComponentCount(n) => {
                write!(f, "n_components must be at least 1, got {}", n)
            }
            PcaError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            PcaError::TooFewSamples(n) => {
                write!(f, "input matrix must have at least 2 samples, got {}", n)
            }
            PcaError::NotFitted => {
                write!(f, "model has not been fitted; call fit before transform")
            }
            PcaError::Decomposition(msg) => write!(f, "decomposition failed: {}", msg),
        }
    }
}

impl Error for PcaError {}
