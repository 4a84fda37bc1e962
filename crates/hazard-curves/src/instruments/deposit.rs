//! Money market deposit instrument.

use serde::{Deserialize, Serialize};

use hazard_core::daycounts::DayCountConvention;
use hazard_core::types::Date;
use hazard_core::HazardError;

use super::{maturity_from_tenor, CurveInstrument};
use crate::discount_curve::DiscountCurve;
use crate::error::CurveResult;

/// A money market deposit.
///
/// Priced at par when:
/// ```text
/// DF(maturity) * (1 + rate * τ) = DF(start)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IborDeposit {
    start_date: Date,
    maturity_date: Date,
    rate: f64,
    day_count: DayCountConvention,
    notional: f64,
}

impl IborDeposit {
    /// Creates a new deposit with unit notional.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidArgument` if maturity is not after start.
    pub fn new(
        start_date: Date,
        maturity_date: Date,
        rate: f64,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if maturity_date <= start_date {
            return Err(HazardError::invalid_argument(format!(
                "deposit maturity {maturity_date} must be after start {start_date}"
            ))
            .into());
        }
        Ok(Self {
            start_date,
            maturity_date,
            rate,
            day_count,
            notional: 1.0,
        })
    }

    /// Creates a deposit maturing a tenor (e.g. `"3M"`) after its start date.
    pub fn from_tenor(
        start_date: Date,
        tenor: &str,
        rate: f64,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let maturity = maturity_from_tenor(start_date, tenor)?;
        Self::new(start_date, maturity, rate, day_count)
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Returns a copy with the rate shifted by `bump`.
    #[must_use]
    pub fn with_bumped_rate(&self, bump: f64) -> Self {
        Self {
            rate: self.rate + bump,
            ..*self
        }
    }

    /// Returns the start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the deposit rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Accrual factor from start to maturity.
    #[must_use]
    pub fn accrual_factor(&self) -> f64 {
        self.day_count
            .year_frac(self.start_date, self.maturity_date)
            .fraction
    }
}

impl CurveInstrument for IborDeposit {
    fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    fn value(&self, value_date: Date, curve: &DiscountCurve) -> f64 {
        let df_start = curve.df_at(self.start_date);
        let df_maturity = curve.df_at(self.maturity_date);
        let growth = 1.0 + self.accrual_factor() * self.rate;
        self.notional * (growth * df_maturity - df_start) / curve.df_at(value_date)
    }

    fn description(&self) -> String {
        format!("Deposit {} {:.4}%", self.maturity_date, self.rate * 100.0)
    }
}
