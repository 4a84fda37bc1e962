//! Fixed leg of an interest rate swap.
//!
//! The leg's cash flows are generated once from its schedule and stored as
//! index-aligned arrays (accrual start, accrual end, payment date, year
//! fraction, accrued days, payment amount).

use serde::{Deserialize, Serialize};

use hazard_core::calendars::{BusinessDayConvention, CalendarType};
use hazard_core::daycounts::DayCountConvention;
use hazard_core::schedule::{DateGenerationRule, Schedule, ScheduleConfig};
use hazard_core::types::{Date, Frequency};
use hazard_core::HazardError;

use super::SwapType;
use crate::error::CurveResult;
use crate::traits::TermStructure;

/// Default swap notional.
const ONE_MILLION: f64 = 1_000_000.0;

/// Contract terms of a swap fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedLegTerms {
    /// Date interest starts to accrue.
    pub effective_date: Date,
    /// Unadjusted termination date.
    pub termination_date: Date,
    /// Whether the leg is paid or received.
    pub swap_type: SwapType,
    /// Fixed coupon rate.
    pub coupon: f64,
    /// Payment frequency.
    pub frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Notional amount.
    pub notional: f64,
    /// Principal exchanged at the final payment, as a fraction of notional.
    pub principal: f64,
    /// Payment lag in business days after each accrual end.
    pub payment_lag: i32,
    /// Holiday calendar.
    pub calendar: CalendarType,
    /// Business day adjustment.
    pub business_day: BusinessDayConvention,
    /// Schedule generation direction.
    pub generation_rule: DateGenerationRule,
    /// End-of-month rolling.
    pub end_of_month: bool,
}

impl FixedLegTerms {
    /// Creates terms with market defaults: 1,000,000 notional, no principal,
    /// no payment lag, weekend calendar, following, backward generation.
    #[must_use]
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        swap_type: SwapType,
        coupon: f64,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            swap_type,
            coupon,
            frequency,
            day_count,
            notional: ONE_MILLION,
            principal: 0.0,
            payment_lag: 0,
            calendar: CalendarType::Weekend,
            business_day: BusinessDayConvention::Following,
            generation_rule: DateGenerationRule::Backward,
            end_of_month: false,
        }
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the final principal exchange.
    #[must_use]
    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the payment lag in business days.
    #[must_use]
    pub fn with_payment_lag(mut self, lag: i32) -> Self {
        self.payment_lag = lag;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_business_day(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day = convention;
        self
    }

    /// Sets the date generation rule.
    #[must_use]
    pub fn with_generation_rule(mut self, rule: DateGenerationRule) -> Self {
        self.generation_rule = rule;
        self
    }

    /// Sets end-of-month rolling.
    #[must_use]
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }
}

/// The fixed leg of a swap with its generated cash flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapFixedLeg {
    terms: FixedLegTerms,
    maturity_date: Date,
    accrual_start_dates: Vec<Date>,
    accrual_end_dates: Vec<Date>,
    payment_dates: Vec<Date>,
    year_fractions: Vec<f64>,
    accrued_days: Vec<i64>,
    payments: Vec<f64>,
}

impl SwapFixedLeg {
    /// Creates a fixed leg with default terms.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        swap_type: SwapType,
        coupon: f64,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        Self::generate(FixedLegTerms::new(
            effective_date,
            termination_date,
            swap_type,
            coupon,
            frequency,
            day_count,
        ))
    }

    /// Generates the leg's cash flows from its terms.
    ///
    /// Nothing is paid on the effective date; the first payment is at the
    /// end of the first accrual period (plus any payment lag).
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidArgument` if the effective date is after
    /// the adjusted maturity date or the schedule has fewer than two dates.
    pub fn generate(terms: FixedLegTerms) -> CurveResult<Self> {
        let maturity_date = terms
            .calendar
            .adjust(terms.termination_date, terms.business_day);

        if terms.effective_date > maturity_date {
            return Err(HazardError::invalid_argument(format!(
                "effective date {} after maturity date {}",
                terms.effective_date, maturity_date
            ))
            .into());
        }

        let schedule = Schedule::generate(
            ScheduleConfig::new(terms.effective_date, terms.termination_date, terms.frequency)
                .with_calendar(terms.calendar)
                .with_business_day_convention(terms.business_day)
                .with_generation_rule(terms.generation_rule)
                .with_end_of_month(terms.end_of_month),
        )?;

        let calendar = terms.calendar.to_calendar();
        let n = schedule.num_periods();
        let mut leg = Self {
            terms,
            maturity_date,
            accrual_start_dates: Vec::with_capacity(n),
            accrual_end_dates: Vec::with_capacity(n),
            payment_dates: Vec::with_capacity(n),
            year_fractions: Vec::with_capacity(n),
            accrued_days: Vec::with_capacity(n),
            payments: Vec::with_capacity(n),
        };

        for (start, end) in schedule.periods() {
            let payment_date = if terms.payment_lag == 0 {
                end
            } else {
                calendar.add_business_days(end, terms.payment_lag)
            };
            let yf = terms.day_count.year_frac(start, end);

            leg.accrual_start_dates.push(start);
            leg.accrual_end_dates.push(end);
            leg.payment_dates.push(payment_date);
            leg.year_fractions.push(yf.fraction);
            leg.accrued_days.push(yf.numerator_days);
            leg.payments.push(yf.fraction * terms.notional * terms.coupon);
        }

        Ok(leg)
    }

    /// Returns a copy with the coupon shifted by `bump`.
    ///
    /// Dates are kept and payments are rescaled by `(c + bump) / c`; a zero
    /// coupon leg has its payments recomputed from the year fractions.
    #[must_use]
    pub fn with_bumped_coupon(&self, bump: f64) -> Self {
        let old = self.terms.coupon;
        let new = old + bump;
        let payments = if old == 0.0 {
            self.year_fractions
                .iter()
                .map(|yf| yf * self.terms.notional * new)
                .collect()
        } else {
            let scale = new / old;
            self.payments.iter().map(|p| p * scale).collect()
        };

        let mut bumped = self.clone();
        bumped.terms.coupon = new;
        bumped.payments = payments;
        bumped
    }

    /// Present value of the leg at `value_date`.
    ///
    /// Only payments strictly after the value date count. The principal
    /// flow is added at the final payment date if that is still in the
    /// future. The sign is negative for a paid leg.
    pub fn value<C: TermStructure + ?Sized>(&self, value_date: Date, curve: &C) -> f64 {
        let df_value = curve.value_at(value_date);
        let mut leg_pv = 0.0;

        for (&payment_date, &amount) in self.payment_dates.iter().zip(&self.payments) {
            if payment_date > value_date {
                leg_pv += amount * curve.value_at(payment_date) / df_value;
            }
        }

        if let Some(&last) = self.payment_dates.last() {
            if last > value_date {
                let df_last = curve.value_at(last) / df_value;
                leg_pv += self.terms.principal * df_last * self.terms.notional;
            }
        }

        match self.terms.swap_type {
            SwapType::Pay => -leg_pv,
            SwapType::Receive => leg_pv,
        }
    }

    /// Returns the contract terms.
    #[must_use]
    pub fn terms(&self) -> &FixedLegTerms {
        &self.terms
    }

    /// Returns the fixed coupon.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.terms.coupon
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.terms.notional
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.terms.effective_date
    }

    /// Returns the business-day adjusted termination date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the accrual start dates.
    #[must_use]
    pub fn accrual_start_dates(&self) -> &[Date] {
        &self.accrual_start_dates
    }

    /// Returns the accrual end dates.
    #[must_use]
    pub fn accrual_end_dates(&self) -> &[Date] {
        &self.accrual_end_dates
    }

    /// Returns the payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Returns the accrual year fractions.
    #[must_use]
    pub fn year_fractions(&self) -> &[f64] {
        &self.year_fractions
    }

    /// Returns the accrued days per period.
    #[must_use]
    pub fn accrued_days(&self) -> &[i64] {
        &self.accrued_days
    }

    /// Returns the payment amounts.
    #[must_use]
    pub fn payments(&self) -> &[f64] {
        &self.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount_curve::DiscountCurve;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn leg() -> SwapFixedLeg {
        SwapFixedLeg::new(
            d(2020, 1, 15),
            d(2022, 1, 15),
            SwapType::Receive,
            0.03,
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360US,
        )
        .unwrap()
    }

    #[test]
    fn test_generated_flows() {
        let leg = leg();
        assert_eq!(leg.payment_dates().len(), 4);
        assert_eq!(leg.accrual_start_dates()[0], d(2020, 1, 15));
        // 2020-07-15 is a Wednesday
        assert_eq!(leg.payment_dates()[0], d(2020, 7, 15));
        // 2022-01-15 is a Saturday, rolled to Monday
        assert_eq!(leg.maturity_date(), d(2022, 1, 17));
        assert_eq!(leg.accrued_days()[0], 180);
        assert_relative_eq!(leg.payments()[0], 0.5 * 0.03 * 1_000_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_value_sign_and_principal() {
        let vd = d(2020, 1, 15);
        let curve = DiscountCurve::flat(vd, 0.02).unwrap();

        let receive = leg();
        let pv = receive.value(vd, &curve);
        assert!(pv > 0.0);

        let pay = SwapFixedLeg::generate(FixedLegTerms {
            swap_type: SwapType::Pay,
            ..*receive.terms()
        })
        .unwrap();
        assert_relative_eq!(pay.value(vd, &curve), -pv, epsilon = 1e-9);

        let with_principal =
            SwapFixedLeg::generate(receive.terms().with_principal(1.0)).unwrap();
        let last = *receive.payment_dates().last().unwrap();
        let expected = pv + 1_000_000.0 * curve.df_at(last);
        assert_relative_eq!(with_principal.value(vd, &curve), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_past_payments_excluded() {
        let leg = leg();
        let vd = d(2021, 1, 15);
        let curve = DiscountCurve::flat(vd, 0.0).unwrap();
        // 2021-01-15 payment is not strictly after the value date
        let expected: f64 = leg.payments()[2..].iter().sum();
        assert_relative_eq!(leg.value(vd, &curve), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_bumped_coupon_rescales_payments() {
        let leg = leg();
        let bumped = leg.with_bumped_coupon(0.0001);
        assert_eq!(bumped.payment_dates(), leg.payment_dates());
        assert_relative_eq!(bumped.coupon(), 0.0301);
        for (b, p) in bumped.payments().iter().zip(leg.payments()) {
            assert_relative_eq!(*b, p * 0.0301 / 0.03, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_effective_after_maturity() {
        let result = SwapFixedLeg::new(
            d(2022, 1, 15),
            d(2020, 1, 15),
            SwapType::Pay,
            0.03,
            Frequency::Annual,
            DayCountConvention::Act360,
        );
        assert!(matches!(
            result,
            Err(crate::CurveError::Core(HazardError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn test_payment_lag() {
        let leg = SwapFixedLeg::generate(
            FixedLegTerms::new(
                d(2020, 1, 15),
                d(2021, 1, 15),
                SwapType::Receive,
                0.03,
                Frequency::Annual,
                DayCountConvention::Act360,
            )
            .with_payment_lag(2),
        )
        .unwrap();
        // 2021-01-15 is a Friday, two business days later is Tuesday
        assert_eq!(leg.payment_dates()[0], d(2021, 1, 19));
        assert_eq!(leg.accrual_end_dates()[0], d(2021, 1, 15));
    }
}
