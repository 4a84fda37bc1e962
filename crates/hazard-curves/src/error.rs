//! Error types for curve operations.

use hazard_core::HazardError;
use hazard_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Invalid curve data (node arrays, instruments).
    #[error("Invalid curve data: {reason}")]
    InvalidData {
        /// Description of the problem.
        reason: String,
    },

    /// Bootstrap failed for a specific instrument.
    #[error("Bootstrap failed at {instrument}: {reason}")]
    BootstrapFailed {
        /// Description of the instrument.
        instrument: String,
        /// Why the solve failed.
        reason: String,
    },

    /// Error from the core layer (dates, schedules, conventions).
    #[error(transparent)]
    Core(#[from] HazardError),

    /// Error from a numerical routine.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    /// Creates a bootstrap failure error.
    #[must_use]
    pub fn bootstrap_failed(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BootstrapFailed {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::bootstrap_failed("Swap 5Y", "root not bracketed");
        assert_eq!(
            err.to_string(),
            "Bootstrap failed at Swap 5Y: root not bracketed"
        );

        let err: CurveError = HazardError::invalid_argument("effective date after maturity").into();
        assert_eq!(
            err.to_string(),
            "Invalid argument: effective date after maturity"
        );
    }
}
