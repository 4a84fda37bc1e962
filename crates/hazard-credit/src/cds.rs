//! Credit default swap contract and valuation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use hazard_core::types::{Date, Tenor};
use hazard_core::{DAYS_IN_YEAR, ONE_BP};

use crate::config::{CdsPricingConfig, IntegrationMethod};
use crate::error::{CreditError, CreditResult};
use crate::integrators::{
    protection_leg_pv, risky_pv01, CurveNodes, ProtectionLegInputs, RiskyAnnuityInputs, RiskyPv01,
};
use crate::issuer_curve::IssuerCurve;
use crate::schedule::{CdsConventions, CdsSchedule};

/// Default CDS notional.
pub const ONE_MILLION: f64 = 1_000_000.0;

/// Maturity of a CDS, either explicit or as a tenor from step-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CdsMaturity {
    /// An explicit, unadjusted maturity date.
    Date(Date),
    /// A tenor added to the step-in date and rolled to the next CDS date.
    Tenor(Tenor),
}

impl From<Date> for CdsMaturity {
    fn from(date: Date) -> Self {
        CdsMaturity::Date(date)
    }
}

impl From<Tenor> for CdsMaturity {
    fn from(tenor: Tenor) -> Self {
        CdsMaturity::Tenor(tenor)
    }
}

/// Dirty and clean present value of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsValue {
    /// Value including premium accrued since the previous coupon date.
    pub dirty_pv: f64,
    /// Value excluding accrued premium.
    pub clean_pv: f64,
}

/// Result of [`Cds::value_fast_approx`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastApproxValue {
    /// Clean value plus accrued interest.
    pub full_pv: f64,
    /// Value excluding accrued premium.
    pub clean_pv: f64,
    /// Change in full value for a 1bp rise in the flat spread.
    pub credit01: f64,
    /// Change in full value for a 1bp rise in the flat rate.
    pub ir01: f64,
}

/// Discount and survival curves a contract is priced against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PricingCurves<'a> {
    pub discount: CurveNodes<'a>,
    pub survival: CurveNodes<'a>,
}

/// A single-name credit default swap.
///
/// The premium leg schedule and flows are generated on construction and
/// never change. Operations that need a different coupon or curve build
/// new values and leave the contract untouched.
///
/// # Example
///
/// ```rust
/// use hazard_core::types::{Date, Tenor};
/// use hazard_credit::prelude::*;
///
/// let step_in = Date::from_ymd(2008, 12, 22).unwrap();
/// let cds = Cds::standard(step_in, Tenor::years(5), 0.0100, true).unwrap();
///
/// assert_eq!(cds.maturity_date(), Date::from_ymd(2014, 3, 20).unwrap());
/// assert_eq!(cds.accrued_days(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cds {
    step_in_date: Date,
    maturity_date: Date,
    running_coupon: f64,
    notional: f64,
    long_protection: bool,
    conventions: CdsConventions,
    schedule: CdsSchedule,
}

impl Cds {
    /// Creates a contract and generates its premium leg.
    ///
    /// A tenor maturity is added to the step-in date and rolled to the next
    /// CDS roll date without holiday adjustment.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` if the step-in date is after
    /// maturity, the coupon is negative or the notional is not positive, and
    /// `CreditError::InvalidConfiguration` for unsupported conventions.
    pub fn new(
        step_in_date: Date,
        maturity: impl Into<CdsMaturity>,
        running_coupon: f64,
        notional: f64,
        long_protection: bool,
        conventions: CdsConventions,
    ) -> CreditResult<Self> {
        let maturity_date = match maturity.into() {
            CdsMaturity::Date(date) => date,
            CdsMaturity::Tenor(tenor) => step_in_date.add_tenor(tenor)?.next_cds_date(),
        };

        if step_in_date > maturity_date {
            return Err(CreditError::invalid_argument(format!(
                "step-in date {step_in_date} after maturity date {maturity_date}"
            )));
        }
        if !(running_coupon >= 0.0 && running_coupon.is_finite()) {
            return Err(CreditError::invalid_argument(format!(
                "running coupon must be non-negative, got {running_coupon}"
            )));
        }
        if !(notional > 0.0 && notional.is_finite()) {
            return Err(CreditError::invalid_argument(format!(
                "notional must be positive, got {notional}"
            )));
        }

        let schedule = CdsSchedule::generate(
            step_in_date,
            maturity_date,
            running_coupon,
            notional,
            &conventions,
        )?;

        Ok(Self {
            step_in_date,
            maturity_date,
            running_coupon,
            notional,
            long_protection,
            conventions,
            schedule,
        })
    }

    /// Creates a contract with standard conventions and 1,000,000 notional.
    pub fn standard(
        step_in_date: Date,
        maturity: impl Into<CdsMaturity>,
        running_coupon: f64,
        long_protection: bool,
    ) -> CreditResult<Self> {
        Self::new(
            step_in_date,
            maturity,
            running_coupon,
            ONE_MILLION,
            long_protection,
            CdsConventions::default(),
        )
    }

    /// Returns the same contract with a different running coupon.
    ///
    /// Dates are kept; only the premium flows change.
    #[must_use]
    pub fn with_running_coupon(&self, running_coupon: f64) -> Self {
        Self {
            running_coupon,
            schedule: self.schedule.with_coupon(running_coupon, self.notional),
            ..self.clone()
        }
    }

    /// Returns the step-in date.
    #[must_use]
    pub fn step_in_date(&self) -> Date {
        self.step_in_date
    }

    /// Returns the unadjusted maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the annualised running coupon.
    #[must_use]
    pub fn running_coupon(&self) -> f64 {
        self.running_coupon
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns true if the holder buys protection.
    #[must_use]
    pub fn is_long_protection(&self) -> bool {
        self.long_protection
    }

    /// Returns the schedule conventions.
    #[must_use]
    pub fn conventions(&self) -> &CdsConventions {
        &self.conventions
    }

    /// Returns the premium leg schedule.
    #[must_use]
    pub fn schedule(&self) -> &CdsSchedule {
        &self.schedule
    }

    fn direction(&self) -> f64 {
        if self.long_protection {
            1.0
        } else {
            -1.0
        }
    }

    fn previous_coupon_date(&self) -> Date {
        self.schedule
            .previous_coupon_date()
            .unwrap_or(self.step_in_date)
    }

    /// Days from the previous coupon date to the step-in date.
    #[must_use]
    pub fn accrued_days(&self) -> i64 {
        self.step_in_date - self.previous_coupon_date()
    }

    /// Premium accrued from the previous coupon date to step-in.
    ///
    /// Negative for a protection buyer, who owes it.
    #[must_use]
    pub fn accrued_interest(&self) -> f64 {
        let accrued = self.accrual_to_step_in() * self.notional * self.running_coupon;
        if self.long_protection {
            -accrued
        } else {
            accrued
        }
    }

    fn accrual_to_step_in(&self) -> f64 {
        self.conventions
            .day_count
            .year_frac(self.previous_coupon_date(), self.step_in_date)
            .fraction
    }

    fn year_time(value_date: Date, date: Date) -> f64 {
        (date - value_date) as f64 / DAYS_IN_YEAR
    }

    pub(crate) fn risky_pv01_on(
        &self,
        value_date: Date,
        curves: PricingCurves<'_>,
        method: IntegrationMethod,
    ) -> RiskyPv01 {
        let (payment_times, accrual_factors): (Vec<f64>, Vec<f64>) = self
            .schedule
            .payment_dates()
            .iter()
            .zip(self.schedule.accrual_factors())
            .map(|(&date, &af)| (Self::year_time(value_date, date), af))
            .filter(|&(t, _)| t > 0.0)
            .unzip();

        risky_pv01(
            &RiskyAnnuityInputs {
                t_eff: Self::year_time(value_date, self.step_in_date),
                accrual_to_now: self.accrual_to_step_in(),
                payment_times: &payment_times,
                accrual_factors: &accrual_factors,
                discount: curves.discount,
                survival: curves.survival,
            },
            method,
        )
    }

    pub(crate) fn protection_leg_pv_on(
        &self,
        value_date: Date,
        curves: PricingCurves<'_>,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> f64 {
        let pv = protection_leg_pv(
            &ProtectionLegInputs {
                t_eff: Self::year_time(value_date, self.step_in_date),
                t_mat: Self::year_time(value_date, self.maturity_date),
                discount: curves.discount,
                survival: curves.survival,
                recovery_rate,
                num_steps_per_year: config.num_steps_per_year,
            },
            config.protection_method,
        );
        pv * self.notional
    }

    pub(crate) fn value_on(
        &self,
        value_date: Date,
        curves: PricingCurves<'_>,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CdsValue {
        let rpv01 = self.risky_pv01_on(value_date, curves, config.rpv01_method);
        let protection = self.protection_leg_pv_on(value_date, curves, recovery_rate, config);
        let premium = self.running_coupon * self.notional;

        CdsValue {
            dirty_pv: self.direction() * (protection - premium * rpv01.full),
            clean_pv: self.direction() * (protection - premium * rpv01.clean),
        }
    }

    /// Risky PV01 per unit notional.
    #[must_use]
    pub fn risky_pv01(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        method: IntegrationMethod,
    ) -> RiskyPv01 {
        self.risky_pv01_on(value_date, issuer_curve.pricing_curves(), method)
    }

    /// Protection leg present value for the full notional.
    #[must_use]
    pub fn protection_leg_pv(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> f64 {
        self.protection_leg_pv_on(value_date, issuer_curve.pricing_curves(), recovery_rate, config)
    }

    /// Premium leg present value: full RPV01 times notional times coupon.
    #[must_use]
    pub fn premium_leg_pv(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        method: IntegrationMethod,
    ) -> f64 {
        self.risky_pv01(value_date, issuer_curve, method).full * self.notional * self.running_coupon
    }

    /// Dirty and clean value from the holder's side.
    #[must_use]
    pub fn value(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CdsValue {
        self.value_on(value_date, issuer_curve.pricing_curves(), recovery_rate, config)
    }

    /// Breakeven running coupon, quoted on the clean RPV01.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::NumericalFailure` if the clean RPV01 is zero.
    pub fn par_spread(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CreditResult<f64> {
        let clean = self
            .risky_pv01(value_date, issuer_curve, config.rpv01_method)
            .clean;
        if clean == 0.0 {
            return Err(CreditError::numerical_failure(format!(
                "zero clean RPV01 for CDS maturing {}",
                self.maturity_date
            )));
        }
        let protection = self.protection_leg_pv(value_date, issuer_curve, recovery_rate, config);
        Ok(protection / clean / self.notional)
    }

    /// Change in dirty value when every contract the issuer curve was
    /// calibrated to has its coupon raised by the configured bump.
    pub fn credit_dv01(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CreditResult<f64> {
        let base = self.value(value_date, issuer_curve, recovery_rate, config);
        let bumped_curve = issuer_curve.with_bumped_coupons(config.bump_size)?;
        let bumped = self.value(value_date, &bumped_curve, recovery_rate, config);
        Ok(bumped.dirty_pv - base.dirty_pv)
    }

    /// Change in dirty value when every Ibor quote is raised by the
    /// configured bump and both curves are rebuilt.
    pub fn interest_dv01(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CreditResult<f64> {
        let base = self.value(value_date, issuer_curve, recovery_rate, config);
        let bumped_curve = issuer_curve.with_bumped_ibor(config.bump_size)?;
        let bumped = self.value(value_date, &bumped_curve, recovery_rate, config);
        Ok(bumped.dirty_pv - base.dirty_pv)
    }

    /// Value forwarded to the settlement date.
    #[must_use]
    pub fn cash_settlement_amount(
        &self,
        value_date: Date,
        settle_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> CdsValue {
        let value = self.value(value_date, issuer_curve, recovery_rate, config);
        let df = issuer_curve.df_at(settle_date);
        CdsValue {
            dirty_pv: value.dirty_pv / df,
            clean_pv: value.clean_pv / df,
        }
    }

    /// Clean price per 100 of notional.
    ///
    /// Computed from the protection buyer's clean value regardless of the
    /// contract's direction.
    #[must_use]
    pub fn clean_price(
        &self,
        value_date: Date,
        issuer_curve: &IssuerCurve,
        recovery_rate: f64,
        config: &CdsPricingConfig,
    ) -> f64 {
        let clean = self
            .risky_pv01(value_date, issuer_curve, config.rpv01_method)
            .clean;
        let protection = self.protection_leg_pv(value_date, issuer_curve, recovery_rate, config);
        let clean_pv = protection - self.running_coupon * clean * self.notional;
        (self.notional - clean_pv) / self.notional * 100.0
    }

    /// Closed-form value for a flat hazard rate and a flat interest rate.
    ///
    /// The hazard rate is `flat_spread / (1 - curve_recovery)`. With
    /// `w = r + h` and `z = e^{-w t_eff} - e^{-w t_mat}`:
    ///
    /// ```text
    /// clean RPV01 = (z / w) * 365 / 360
    /// protection  = h (1 - R) (z / w) N
    /// ```
    ///
    /// `credit01` and `ir01` re-evaluate with the spread or the rate raised
    /// by 1bp. The signed accrued interest is added to every full value.
    #[must_use]
    pub fn value_fast_approx(
        &self,
        value_date: Date,
        flat_rate: f64,
        flat_spread: f64,
        curve_recovery: f64,
        contract_recovery: f64,
    ) -> FastApproxValue {
        let t_eff = Self::year_time(value_date, self.step_in_date);
        let t_mat = Self::year_time(value_date, self.maturity_date);
        let accrued = self.accrued_interest();

        let clean_pv = |rate: f64, spread: f64| {
            let h = spread / (1.0 - curve_recovery);
            let w = rate + h;
            let z = (-w * t_eff).exp() - (-w * t_mat).exp();
            let clean_rpv01 = (z / w) * 365.0 / 360.0;
            let protection = h * (1.0 - contract_recovery) * (z / w) * self.notional;
            self.direction() * (protection - self.running_coupon * clean_rpv01 * self.notional)
        };

        let clean = clean_pv(flat_rate, flat_spread);
        let full = clean + accrued;
        let credit_bumped = clean_pv(flat_rate, flat_spread + ONE_BP) + accrued;
        let rate_bumped = clean_pv(flat_rate + ONE_BP, flat_spread) + accrued;

        FastApproxValue {
            full_pv: full,
            clean_pv: clean,
            credit01: credit_bumped - full,
            ir01: rate_bumped - full,
        }
    }
}

impl fmt::Display for Cds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CDS {} {} to {} {:.2}bp on {}",
            if self.long_protection { "long" } else { "short" },
            self.step_in_date,
            self.maturity_date,
            self.running_coupon * 10_000.0,
            self.notional
        )
    }
}
