//! Option type and exercise style enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time up to expiry.
    American,
}

/// Option payoff type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// European call.
    EuropeanCall,
    /// European put.
    EuropeanPut,
    /// American call.
    AmericanCall,
    /// American put.
    AmericanPut,
    /// Digital (cash-or-nothing) call.
    DigitalCall,
    /// Digital (cash-or-nothing) put.
    DigitalPut,
}

impl OptionType {
    /// Returns true for call payoffs.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(
            self,
            OptionType::EuropeanCall | OptionType::AmericanCall | OptionType::DigitalCall
        )
    }

    /// Returns true for put payoffs.
    #[must_use]
    pub fn is_put(&self) -> bool {
        !self.is_call()
    }

    /// Returns true for digital payoffs.
    #[must_use]
    pub fn is_digital(&self) -> bool {
        matches!(self, OptionType::DigitalCall | OptionType::DigitalPut)
    }

    /// Exercise style implied by the option type.
    ///
    /// Only the European variants are treated as European; everything
    /// else exercises American.
    #[must_use]
    pub fn exercise_style(&self) -> ExerciseStyle {
        match self {
            OptionType::EuropeanCall | OptionType::EuropeanPut => ExerciseStyle::European,
            _ => ExerciseStyle::American,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionType::EuropeanCall => "European Call",
            OptionType::EuropeanPut => "European Put",
            OptionType::AmericanCall => "American Call",
            OptionType::AmericanPut => "American Put",
            OptionType::DigitalCall => "Digital Call",
            OptionType::DigitalPut => "Digital Put",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_style() {
        assert_eq!(
            OptionType::EuropeanCall.exercise_style(),
            ExerciseStyle::European
        );
        assert_eq!(
            OptionType::EuropeanPut.exercise_style(),
            ExerciseStyle::European
        );
        assert_eq!(
            OptionType::AmericanPut.exercise_style(),
            ExerciseStyle::American
        );
    }

    #[test]
    fn test_call_put() {
        assert!(OptionType::AmericanCall.is_call());
        assert!(OptionType::EuropeanPut.is_put());
        assert!(OptionType::DigitalPut.is_digital());
        assert!(!OptionType::EuropeanCall.is_digital());
    }
}
