//! Pricing configuration for the CDS engine.
//!
//! [`CdsPricingConfig`] collects the numerical settings the integrators
//! need. Every field has a serde default, so a partial JSON document (or an
//! empty one) yields the market-standard setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hazard_core::ONE_BP;

use crate::error::{CreditError, CreditResult};

/// Default number of protection leg integration steps per year.
pub const DEFAULT_STEPS_PER_YEAR: u32 = 25;

/// Market standard recovery rate for senior unsecured debt.
pub const STANDARD_RECOVERY_RATE: f64 = 0.40;

/// Approximation used for default-time integrals inside a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IntegrationMethod {
    /// Hazard and discount rates held flat within each step, integrated in
    /// closed form.
    #[default]
    FlatHazard,
    /// Linear (trapezoidal) approximation of the survival drop.
    Linear,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::FlatHazard => write!(f, "FlatHazard"),
            IntegrationMethod::Linear => write!(f, "Linear"),
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = CreditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "FLATHAZARD" | "FLAT" => Ok(IntegrationMethod::FlatHazard),
            "LINEAR" => Ok(IntegrationMethod::Linear),
            _ => Err(CreditError::invalid_configuration(format!(
                "Unknown integration method: {s}"
            ))),
        }
    }
}

/// Numerical settings for CDS valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsPricingConfig {
    /// Protection leg integration steps per year.
    #[serde(default = "default_steps_per_year")]
    pub num_steps_per_year: u32,

    /// Accrued-on-default approximation in the risky PV01.
    #[serde(default)]
    pub rpv01_method: IntegrationMethod,

    /// Survival-drop approximation in the protection leg.
    #[serde(default)]
    pub protection_method: IntegrationMethod,

    /// Recovery rate used when none is quoted.
    #[serde(default = "default_recovery_rate")]
    pub standard_recovery_rate: f64,

    /// Size of the finite-difference bump for sensitivities.
    #[serde(default = "default_bump_size")]
    pub bump_size: f64,
}

fn default_steps_per_year() -> u32 {
    DEFAULT_STEPS_PER_YEAR
}

fn default_recovery_rate() -> f64 {
    STANDARD_RECOVERY_RATE
}

fn default_bump_size() -> f64 {
    ONE_BP
}

impl Default for CdsPricingConfig {
    fn default() -> Self {
        Self {
            num_steps_per_year: DEFAULT_STEPS_PER_YEAR,
            rpv01_method: IntegrationMethod::FlatHazard,
            protection_method: IntegrationMethod::FlatHazard,
            standard_recovery_rate: STANDARD_RECOVERY_RATE,
            bump_size: ONE_BP,
        }
    }
}

impl CdsPricingConfig {
    /// Uses the same integration method for both legs.
    #[must_use]
    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.rpv01_method = method;
        self.protection_method = method;
        self
    }

    /// Sets the protection leg steps per year.
    #[must_use]
    pub fn with_steps_per_year(mut self, steps: u32) -> Self {
        self.num_steps_per_year = steps;
        self
    }

    /// Sets the sensitivity bump size.
    #[must_use]
    pub fn with_bump_size(mut self, bump: f64) -> Self {
        self.bump_size = bump;
        self
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidConfiguration` for a zero step count,
    /// a recovery rate outside `[0, 1)` or a non-positive bump.
    pub fn validate(&self) -> CreditResult<()> {
        if self.num_steps_per_year == 0 {
            return Err(CreditError::invalid_configuration(
                "num_steps_per_year must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.standard_recovery_rate) {
            return Err(CreditError::invalid_configuration(format!(
                "standard_recovery_rate {} outside [0, 1)",
                self.standard_recovery_rate
            )));
        }
        if !(self.bump_size > 0.0 && self.bump_size.is_finite()) {
            return Err(CreditError::invalid_configuration(format!(
                "bump_size {} must be positive",
                self.bump_size
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidConfiguration` if the document is not
    /// valid JSON for this type or fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> CreditResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CreditError::invalid_configuration(format!("bad pricing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CdsPricingConfig::default();
        assert_eq!(config.num_steps_per_year, 25);
        assert_eq!(config.rpv01_method, IntegrationMethod::FlatHazard);
        assert_eq!(config.standard_recovery_rate, 0.40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CdsPricingConfig::from_json(r#"{"num_steps_per_year": 100}"#).unwrap();
        assert_eq!(config.num_steps_per_year, 100);
        assert_eq!(config.protection_method, IntegrationMethod::FlatHazard);
        assert_eq!(config.bump_size, ONE_BP);

        let empty = CdsPricingConfig::from_json("{}").unwrap();
        assert_eq!(empty, CdsPricingConfig::default());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            CdsPricingConfig::from_json(r#"{"num_steps_per_year": 0}"#),
            Err(CreditError::InvalidConfiguration { .. })
        ));
        assert!(CdsPricingConfig::from_json(r#"{"standard_recovery_rate": 1.0}"#).is_err());
        assert!(CdsPricingConfig::from_json(r#"{"rpv01_method": "Cubic"}"#).is_err());
        assert!(CdsPricingConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("flat_hazard".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::FlatHazard);
        assert_eq!("Linear".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::Linear);
        assert!("spline".parse::<IntegrationMethod>().is_err());
    }
}
