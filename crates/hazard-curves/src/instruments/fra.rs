//! Forward rate agreement instrument.

use serde::{Deserialize, Serialize};

use hazard_core::daycounts::DayCountConvention;
use hazard_core::types::Date;
use hazard_core::HazardError;

use super::CurveInstrument;
use crate::discount_curve::DiscountCurve;
use crate::error::CurveResult;

/// A forward rate agreement on a single-curve basis.
///
/// The payer pays the fixed FRA rate and receives the forward Ibor rate
/// for the period `[start, maturity]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IborFra {
    start_date: Date,
    maturity_date: Date,
    fra_rate: f64,
    day_count: DayCountConvention,
    notional: f64,
    pay_fixed: bool,
}

impl IborFra {
    /// Creates a payer FRA with unit notional.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidArgument` if maturity is not after start.
    pub fn new(
        start_date: Date,
        maturity_date: Date,
        fra_rate: f64,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if maturity_date <= start_date {
            return Err(HazardError::invalid_argument(format!(
                "FRA maturity {maturity_date} must be after start {start_date}"
            ))
            .into());
        }
        Ok(Self {
            start_date,
            maturity_date,
            fra_rate,
            day_count,
            notional: 1.0,
            pay_fixed: true,
        })
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Makes this a receiver FRA.
    #[must_use]
    pub fn receiver(mut self) -> Self {
        self.pay_fixed = false;
        self
    }

    /// Returns a copy with the FRA rate shifted by `bump`.
    #[must_use]
    pub fn with_bumped_rate(&self, bump: f64) -> Self {
        Self {
            fra_rate: self.fra_rate + bump,
            ..*self
        }
    }

    /// Returns the FRA rate.
    #[must_use]
    pub fn fra_rate(&self) -> f64 {
        self.fra_rate
    }

    /// Forward Ibor rate implied by the curve for the FRA period.
    #[must_use]
    pub fn forward_rate(&self, curve: &DiscountCurve) -> f64 {
        let tau = self
            .day_count
            .year_frac(self.start_date, self.maturity_date)
            .fraction;
        (curve.df_at(self.start_date) / curve.df_at(self.maturity_date) - 1.0) / tau
    }
}

impl CurveInstrument for IborFra {
    fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    fn value(&self, value_date: Date, curve: &DiscountCurve) -> f64 {
        let tau = self
            .day_count
            .year_frac(self.start_date, self.maturity_date)
            .fraction;
        let df_start = curve.df_at(self.start_date);
        let df_maturity = curve.df_at(self.maturity_date);
        let pv = self.notional * (df_start - (1.0 + tau * self.fra_rate) * df_maturity)
            / curve.df_at(value_date);
        if self.pay_fixed {
            pv
        } else {
            -pv
        }
    }

    fn description(&self) -> String {
        format!(
            "FRA {}x{} {:.4}%",
            self.start_date,
            self.maturity_date,
            self.fra_rate * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fra_at_forward_rate_is_zero() {
        let vd = Date::from_ymd(2025, 1, 2).unwrap();
        let curve = DiscountCurve::flat(vd, 0.04).unwrap();
        let start = Date::from_ymd(2025, 4, 2).unwrap();
        let end = Date::from_ymd(2025, 7, 2).unwrap();

        let at_market = IborFra::new(start, end, 0.0, DayCountConvention::Act360).unwrap();
        let fwd = at_market.forward_rate(&curve);

        let fra = IborFra::new(start, end, fwd, DayCountConvention::Act360).unwrap();
        assert_abs_diff_eq!(fra.value(vd, &curve), 0.0, epsilon = 1e-15);

        // Payer loses when the fixed rate is above the forward
        let rich = fra.with_bumped_rate(0.001);
        assert!(rich.value(vd, &curve) < 0.0);
        assert!(rich.receiver().value(vd, &curve) > 0.0);
    }
}
