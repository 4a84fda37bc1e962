//! Error types for bond and bond option analytics.

use hazard_core::HazardError;
use hazard_curves::CurveError;
use hazard_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors raised by bond construction, tree building and option pricing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Malformed bond or option parameters.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// Unsupported model configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },

    /// The lattice could not be calibrated or evaluated.
    #[error("Numerical failure: {reason}")]
    NumericalFailure {
        /// Description of the problem.
        reason: String,
    },

    /// Error from the core layer.
    #[error(transparent)]
    Core(#[from] HazardError),

    /// Error from the curve layer.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Error from a numerical routine.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Creates a numerical failure error.
    #[must_use]
    pub fn numerical_failure(reason: impl Into<String>) -> Self {
        Self::NumericalFailure {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BondError::invalid_argument("unknown option type Digital Call");
        assert_eq!(
            err.to_string(),
            "Invalid argument: unknown option type Digital Call"
        );
    }

    #[test]
    fn test_from_core() {
        let err: BondError = HazardError::invalid_date("2025-02-30").into();
        assert!(matches!(err, BondError::Core(_)));
    }
}
