//! Fixed-for-floating interest rate swap.

use serde::{Deserialize, Serialize};
use std::fmt;

use hazard_core::daycounts::DayCountConvention;
use hazard_core::types::{Date, Frequency, Tenor};

use super::{CurveInstrument, FixedLegTerms, SwapFixedLeg};
use crate::discount_curve::DiscountCurve;
use crate::error::CurveResult;

/// Direction of the fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapType {
    /// Pay fixed, receive floating.
    Pay,
    /// Receive fixed, pay floating.
    Receive,
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapType::Pay => write!(f, "Pay"),
            SwapType::Receive => write!(f, "Receive"),
        }
    }
}

/// A single-curve vanilla swap.
///
/// The floating leg is valued off the same curve it is calibrated to, so
/// its PV reduces to `N * (DF(effective) - DF(maturity))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IborSwap {
    fixed_leg: SwapFixedLeg,
}

impl IborSwap {
    /// Creates a swap from an explicit fixed leg.
    #[must_use]
    pub fn new(fixed_leg: SwapFixedLeg) -> Self {
        Self { fixed_leg }
    }

    /// Creates a swap starting at `effective_date` and running for `tenor`.
    pub fn from_tenor(
        effective_date: Date,
        tenor: &str,
        swap_type: SwapType,
        coupon: f64,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let termination = effective_date.add_tenor(Tenor::parse(tenor)?)?;
        let terms = FixedLegTerms::new(
            effective_date,
            termination,
            swap_type,
            coupon,
            frequency,
            day_count,
        );
        Ok(Self::new(SwapFixedLeg::generate(terms)?))
    }

    /// Returns a copy with the fixed coupon shifted by `bump`.
    #[must_use]
    pub fn with_bumped_coupon(&self, bump: f64) -> Self {
        Self {
            fixed_leg: self.fixed_leg.with_bumped_coupon(bump),
        }
    }

    /// Returns the fixed leg.
    #[must_use]
    pub fn fixed_leg(&self) -> &SwapFixedLeg {
        &self.fixed_leg
    }

    /// Returns the fixed coupon.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.fixed_leg.coupon()
    }

    /// Present value of the floating leg from the receiver's side.
    pub fn float_leg_value(&self, value_date: Date, curve: &DiscountCurve) -> f64 {
        let df_start = curve.df_at(self.fixed_leg.effective_date());
        let df_end = curve.df_at(self.maturity_date());
        self.fixed_leg.notional() * (df_start - df_end) / curve.df_at(value_date)
    }
}

impl CurveInstrument for IborSwap {
    fn maturity_date(&self) -> Date {
        self.fixed_leg
            .payment_dates()
            .last()
            .copied()
            .unwrap_or_else(|| self.fixed_leg.maturity_date())
    }

    fn value(&self, value_date: Date, curve: &DiscountCurve) -> f64 {
        let fixed = self.fixed_leg.value(value_date, curve);
        let float = self.float_leg_value(value_date, curve);
        match self.fixed_leg.terms().swap_type {
            SwapType::Pay => fixed + float,
            SwapType::Receive => fixed - float,
        }
    }

    fn description(&self) -> String {
        format!(
            "Swap {} {:.4}%",
            self.maturity_date(),
            self.fixed_leg.coupon() * 100.0
        )
    }
}
