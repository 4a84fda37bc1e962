//! Fixed coupon bond.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hazard_core::daycounts::DayCountConvention;
use hazard_core::types::{Date, Frequency};
use hazard_curves::TermStructure;

use crate::error::{BondError, BondResult};

/// A bullet bond paying a fixed coupon.
///
/// Coupon dates are unadjusted and generated backward from maturity in whole
/// periods, stopping at the last date on or before the issue date. That first
/// date anchors accrual for the first coupon and carries no flow.
///
/// Flow amounts are per unit of face: `[0, c/f, ..., c/f]`. The redemption
/// of principal at maturity is not part of the flow vector.
///
/// # Example
///
/// ```rust
/// use hazard_bonds::Bond;
/// use hazard_core::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let bond = Bond::new(
///     Date::from_ymd(2020, 5, 15).unwrap(),
///     Date::from_ymd(2025, 5, 15).unwrap(),
///     dec!(0.05),
///     Frequency::SemiAnnual,
///     DayCountConvention::ActActIsda,
/// )
/// .unwrap();
///
/// assert_eq!(bond.coupon_dates().len(), 11);
/// assert_eq!(bond.flow_amounts()[0], 0.0);
/// assert!((bond.flow_amounts()[1] - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    issue_date: Date,
    maturity_date: Date,

    /// Annual coupon rate as a decimal (0.05 = 5%).
    coupon: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,

    /// Face value (default 100).
    face: Decimal,

    coupon_dates: Vec<Date>,
    flow_amounts: Vec<f64>,
}

impl Bond {
    /// Creates a bond with a face value of 100.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidArgument` if the issue date is not before
    /// maturity or the coupon is negative or not representable as `f64`.
    pub fn new(
        issue_date: Date,
        maturity_date: Date,
        coupon: Decimal,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> BondResult<Self> {
        if issue_date >= maturity_date {
            return Err(BondError::invalid_argument(format!(
                "issue date {issue_date} must be before maturity {maturity_date}"
            )));
        }
        if coupon.is_sign_negative() {
            return Err(BondError::invalid_argument(format!(
                "coupon must be non-negative, got {coupon}"
            )));
        }
        let coupon_rate = coupon
            .to_f64()
            .ok_or_else(|| BondError::invalid_argument(format!("coupon {coupon} out of range")))?;

        let coupon_dates = generate_coupon_dates(issue_date, maturity_date, frequency)?;

        let periods = frequency.periods_per_year();
        let per_period = if periods == 0 {
            0.0
        } else {
            coupon_rate / f64::from(periods)
        };
        let mut flow_amounts = vec![per_period; coupon_dates.len()];
        flow_amounts[0] = 0.0;

        Ok(Self {
            issue_date,
            maturity_date,
            coupon,
            frequency,
            day_count,
            face: Decimal::ONE_HUNDRED,
            coupon_dates,
            flow_amounts,
        })
    }

    /// Returns a copy with a different face value.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidArgument` for a non-positive face.
    pub fn with_face(mut self, face: Decimal) -> BondResult<Self> {
        if face <= Decimal::ZERO {
            return Err(BondError::invalid_argument(format!(
                "face must be positive, got {face}"
            )));
        }
        self.face = face;
        Ok(self)
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the annual coupon rate.
    #[must_use]
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the face value.
    #[must_use]
    pub fn face(&self) -> Decimal {
        self.face
    }

    /// Unadjusted coupon dates, starting at the date on or before issue.
    #[must_use]
    pub fn coupon_dates(&self) -> &[Date] {
        &self.coupon_dates
    }

    /// Coupon amounts per unit face, index-aligned with [`coupon_dates`](Bond::coupon_dates).
    #[must_use]
    pub fn flow_amounts(&self) -> &[f64] {
        &self.flow_amounts
    }

    /// Previous and next coupon dates around a settlement date.
    ///
    /// Returns `None` if settlement is before the first coupon date or on or
    /// after maturity.
    #[must_use]
    pub fn coupon_period(&self, settle: Date) -> Option<(Date, Date)> {
        self.coupon_dates
            .windows(2)
            .find(|w| w[0] <= settle && settle < w[1])
            .map(|w| (w[0], w[1]))
    }

    /// Accrued interest at settlement, per 100 face.
    ///
    /// The coupon for the current period is pro-rated by the day count's
    /// year fraction from the previous coupon date.
    #[must_use]
    pub fn accrued_interest(&self, settle: Date) -> f64 {
        let Some((pcd, ncd)) = self.coupon_period(settle) else {
            return 0.0;
        };
        let Some(index) = self.coupon_dates.iter().position(|d| *d == ncd) else {
            return 0.0;
        };
        let full_period = self.day_count.year_frac(pcd, ncd).fraction;
        if full_period <= 0.0 {
            return 0.0;
        }
        let accrued = self.day_count.year_frac(pcd, settle).fraction / full_period;
        100.0 * accrued * self.flow_amounts[index]
    }

    /// Dirty price per 100 face, discounting remaining flows to settlement.
    ///
    /// Flows on or before settlement are excluded.
    #[must_use]
    pub fn dirty_price_from_discount_curve<C: TermStructure + ?Sized>(
        &self,
        settle: Date,
        curve: &C,
    ) -> f64 {
        if settle >= self.maturity_date {
            return 0.0;
        }
        let df_settle = curve.value_at(settle);

        let coupons: f64 = self
            .coupon_dates
            .iter()
            .zip(&self.flow_amounts)
            .skip(1)
            .filter(|(date, _)| **date > settle)
            .map(|(date, amount)| amount * curve.value_at(*date))
            .sum();
        let principal = curve.value_at(self.maturity_date);

        100.0 * (coupons + principal) / df_settle
    }

    /// Clean price per 100 face.
    #[must_use]
    pub fn clean_price_from_discount_curve<C: TermStructure + ?Sized>(
        &self,
        settle: Date,
        curve: &C,
    ) -> f64 {
        self.dirty_price_from_discount_curve(settle, curve) - self.accrued_interest(settle)
    }
}

/// Generates coupon dates backward from maturity.
///
/// Each date is `maturity - k` periods so month-end clamping never drifts.
fn generate_coupon_dates(
    issue_date: Date,
    maturity_date: Date,
    frequency: Frequency,
) -> BondResult<Vec<Date>> {
    if frequency.is_zero() {
        return Ok(vec![issue_date, maturity_date]);
    }

    let months = frequency.months_per_period() as i32;
    let mut dates = vec![maturity_date];
    let mut periods = 1;
    loop {
        let date = maturity_date.add_months(-months * periods)?;
        dates.push(date);
        if date <= issue_date {
            break;
        }
        periods += 1;
    }
    dates.reverse();
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hazard_curves::DiscountCurve;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn five_percent_semi() -> Bond {
        Bond::new(
            d(2020, 5, 15),
            d(2025, 5, 15),
            dec!(0.05),
            Frequency::SemiAnnual,
            DayCountConvention::ActActIsda,
        )
        .unwrap()
    }

    #[test]
    fn test_coupon_dates_backward_from_maturity() {
        let bond = five_percent_semi();
        let dates = bond.coupon_dates();
        assert_eq!(dates[0], d(2020, 5, 15));
        assert_eq!(dates[1], d(2020, 11, 15));
        assert_eq!(*dates.last().unwrap(), d(2025, 5, 15));
    }

    #[test]
    fn test_first_date_before_issue() {
        // Odd first period: the anchor date precedes issue
        let bond = Bond::new(
            d(2020, 7, 1),
            d(2023, 5, 15),
            dec!(0.04),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360US,
        )
        .unwrap();
        assert_eq!(bond.coupon_dates()[0], d(2020, 5, 15));
        assert_eq!(bond.coupon_dates()[1], d(2020, 11, 15));
        assert_eq!(bond.flow_amounts().len(), bond.coupon_dates().len());
    }

    #[test]
    fn test_zero_coupon_flows() {
        let bond = Bond::new(
            d(2020, 1, 1),
            d(2030, 1, 1),
            dec!(0),
            Frequency::Zero,
            DayCountConvention::Act365Fixed,
        )
        .unwrap();
        assert_eq!(bond.coupon_dates(), &[d(2020, 1, 1), d(2030, 1, 1)]);
        assert!(bond.flow_amounts().iter().all(|a| *a == 0.0));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(Bond::new(
            d(2025, 1, 1),
            d(2020, 1, 1),
            dec!(0.05),
            Frequency::Annual,
            DayCountConvention::Act365Fixed,
        )
        .is_err());
        assert!(Bond::new(
            d(2020, 1, 1),
            d(2025, 1, 1),
            dec!(-0.01),
            Frequency::Annual,
            DayCountConvention::Act365Fixed,
        )
        .is_err());
        assert!(five_percent_semi().with_face(dec!(0)).is_err());
    }

    #[test]
    fn test_accrued_interest() {
        let bond = five_percent_semi();
        assert_eq!(bond.accrued_interest(d(2021, 5, 15)), 0.0);
        assert_eq!(bond.accrued_interest(d(2025, 5, 15)), 0.0);

        let accrued = bond.accrued_interest(d(2021, 8, 15));
        assert!(accrued > 1.0 && accrued < 1.5);
    }

    #[test]
    fn test_par_bond_prices_near_par() {
        let bond = five_percent_semi();
        let settle = d(2020, 5, 15);
        // Continuously compounded rate equivalent to 5% semi-annual
        let rate = 2.0 * (1.025f64).ln();
        let curve = DiscountCurve::flat(settle, rate).unwrap();

        let price = bond.clean_price_from_discount_curve(settle, &curve);
        // Model time is ACT/365 so the match to par is approximate
        assert_relative_eq!(price, 100.0, epsilon = 0.05);
    }
}
