//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
