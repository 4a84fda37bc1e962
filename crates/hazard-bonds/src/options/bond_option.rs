//! Options on fixed coupon bonds priced on a short rate lattice.

use serde::{Deserialize, Serialize};

use hazard_core::types::{Date, OptionType};
use hazard_core::DAYS_IN_YEAR;
use hazard_curves::{DiscountCurve, TermStructure};

use crate::bond::Bond;
use crate::error::{BondError, BondResult};
use crate::options::short_rate::ShortRateTreeModel;

/// Face value the lattice prices against; strikes are quoted per 100.
const PAR: f64 = 100.0;

/// A European or American option on a bond's clean price.
///
/// The exercise style follows from the option type: the European variants
/// exercise only at expiry, every other type is treated as American.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondOption {
    bond: Bond,
    expiry_date: Date,

    /// Strike clean price per 100 face.
    strike: f64,
    option_type: OptionType,
}

impl BondOption {
    /// Creates a bond option.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidArgument` if expiry is after the bond's
    /// maturity or the strike is not a finite non-negative price.
    pub fn new(
        bond: Bond,
        expiry_date: Date,
        strike: f64,
        option_type: OptionType,
    ) -> BondResult<Self> {
        if expiry_date > bond.maturity_date() {
            return Err(BondError::invalid_argument(format!(
                "expiry {expiry_date} is after bond maturity {}",
                bond.maturity_date()
            )));
        }
        if !(strike.is_finite() && strike >= 0.0) {
            return Err(BondError::invalid_argument(format!(
                "strike must be a non-negative price, got {strike}"
            )));
        }
        Ok(Self {
            bond,
            expiry_date,
            strike,
            option_type,
        })
    }

    /// Returns the underlying bond.
    #[must_use]
    pub fn bond(&self) -> &Bond {
        &self.bond
    }

    /// Returns the expiry date.
    #[must_use]
    pub fn expiry_date(&self) -> Date {
        self.expiry_date
    }

    /// Returns the strike price.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the option type.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Coupon times and amounts handed to the lattice.
    ///
    /// In order:
    /// 1. the previous coupon date of the period containing the valuation
    ///    date, as a negative time, with that period's coupon (accrual anchor)
    /// 2. a coupon paid on the valuation date itself, at time zero
    /// 3. every coupon strictly after the valuation date
    ///
    /// Amounts are per unit face and exclude the redemption of principal.
    #[must_use]
    pub fn coupon_schedule(&self, value_date: Date) -> (Vec<f64>, Vec<f64>) {
        let dates = self.bond.coupon_dates();
        let amounts = self.bond.flow_amounts();
        let year_time = |date: Date| value_date.days_between(&date) as f64 / DAYS_IN_YEAR;

        let mut times = Vec::with_capacity(dates.len());
        let mut flows = Vec::with_capacity(dates.len());

        if let Some(i) = (1..dates.len()).find(|&i| dates[i - 1] < value_date && value_date < dates[i])
        {
            times.push(year_time(dates[i - 1]));
            flows.push(amounts[i]);
        }

        for i in (1..dates.len()).filter(|&i| dates[i] == value_date) {
            times.push(0.0);
            flows.push(amounts[i]);
        }

        for i in (1..dates.len()).filter(|&i| dates[i] > value_date) {
            times.push(year_time(dates[i]));
            flows.push(amounts[i]);
        }

        (times, flows)
    }

    /// Values the option on a lattice calibrated to the discount curve.
    ///
    /// The lattice is built out to the bond's maturity and priced with a
    /// face of 100.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidArgument` for digital option types, and
    /// propagates tree building and pricing errors from the model.
    pub fn value<M: ShortRateTreeModel>(
        &self,
        value_date: Date,
        discount_curve: &DiscountCurve,
        model: &M,
    ) -> BondResult<f64> {
        if self.option_type.is_digital() {
            log::error!("Unknown option type {} for bond option", self.option_type);
            return Err(BondError::invalid_argument(format!(
                "unsupported option type {}",
                self.option_type
            )));
        }

        let time_to_expiry = value_date.days_between(&self.expiry_date) as f64 / DAYS_IN_YEAR;
        let time_to_maturity =
            value_date.days_between(&self.bond.maturity_date()) as f64 / DAYS_IN_YEAR;
        let (coupon_times, coupon_amounts) = self.coupon_schedule(value_date);
        let exercise = self.option_type.exercise_style();

        let tree = model.build_tree(
            time_to_maturity,
            discount_curve.times(),
            discount_curve.values(),
        )?;
        let values = model.bond_option(
            &tree,
            time_to_expiry,
            self.strike,
            PAR,
            &coupon_times,
            &coupon_amounts,
            exercise,
        )?;

        log::debug!(
            "{} bond option on {}: call {:.6}, put {:.6}",
            model.name(),
            value_date,
            values.call,
            values.put
        );

        if self.option_type.is_call() {
            Ok(values.call)
        } else {
            Ok(values.put)
        }
    }
}
