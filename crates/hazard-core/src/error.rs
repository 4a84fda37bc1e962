//! Error types for the Hazard library.
//!
//! This module defines the core error taxonomy shared by every Hazard crate.
//! Higher layers wrap these errors with `#[from]` conversions.

use thiserror::Error;

/// A specialized Result type for Hazard core operations.
pub type HazardResult<T> = Result<T, HazardError>;

/// The main error type for Hazard core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HazardError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Malformed instrument or function parameter.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of what is wrong with the argument.
        reason: String,
    },

    /// Unsupported convention, rule or enum value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the unsupported configuration.
        reason: String,
    },

    /// A numerical routine failed (bracketing, convergence).
    #[error("Numerical failure: {reason}")]
    NumericalFailure {
        /// Description of the failure.
        reason: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl HazardError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

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

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}
