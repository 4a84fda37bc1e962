//! Error types for credit analytics.

use hazard_core::HazardError;
use hazard_curves::CurveError;
use hazard_math::MathError;
use thiserror::Error;

/// A specialized Result type for credit operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// Errors raised by CDS construction, pricing and issuer curve building.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    /// Malformed instrument parameters.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// Unsupported convention or configuration value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },

    /// A numerical routine could not produce a result.
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

impl CreditError {
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
