//! Risky annuity and protection leg integrators.
//!
//! These are free functions over plain node slices so they can run in tight
//! calibration loops and across threads without touching any curve object.
//! Both curves are read with flat-forward interpolation, which keeps the
//! local rates derived from adjacent points consistent with the curve.

use serde::{Deserialize, Serialize};

use hazard_math::interpolation::flat_forward_interpolate;

use crate::config::IntegrationMethod;

/// Guard on `alpha^2` in the accrued-on-default term.
const RPV01_EPSILON: f64 = 1e-20;

/// Guard on `h + r` in the protection leg step.
const PROTECTION_EPSILON: f64 = 1e-8;

/// Node arrays of a flat-forward curve.
#[derive(Debug, Clone, Copy)]
pub struct CurveNodes<'a> {
    /// Node times in years.
    pub times: &'a [f64],
    /// Discount factors or survival probabilities at the nodes.
    pub values: &'a [f64],
}

impl<'a> CurveNodes<'a> {
    /// Wraps a pair of node slices.
    #[must_use]
    pub fn new(times: &'a [f64], values: &'a [f64]) -> Self {
        Self { times, values }
    }

    #[inline]
    fn at(&self, t: f64) -> f64 {
        flat_forward_interpolate(t, self.times, self.values)
    }
}

/// Full and clean risky PV01 per unit notional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskyPv01 {
    /// Includes the coupon accrued since the previous coupon date.
    pub full: f64,
    /// Full RPV01 less the accrued fraction.
    pub clean: f64,
}

/// Inputs to [`risky_pv01`].
#[derive(Debug, Clone, Copy)]
pub struct RiskyAnnuityInputs<'a> {
    /// Step-in time in years from the value date.
    pub t_eff: f64,
    /// Year fraction from the previous coupon date to step-in.
    pub accrual_to_now: f64,
    /// Times of the future premium payments.
    pub payment_times: &'a [f64],
    /// Accrual factor of each future period, aligned with `payment_times`.
    pub accrual_factors: &'a [f64],
    /// Discount curve nodes.
    pub discount: CurveNodes<'a>,
    /// Survival curve nodes.
    pub survival: CurveNodes<'a>,
}

/// Inputs to [`protection_leg_pv`].
#[derive(Debug, Clone, Copy)]
pub struct ProtectionLegInputs<'a> {
    /// Step-in time in years from the value date.
    pub t_eff: f64,
    /// Maturity time in years from the value date.
    pub t_mat: f64,
    /// Discount curve nodes.
    pub discount: CurveNodes<'a>,
    /// Survival curve nodes.
    pub survival: CurveNodes<'a>,
    /// Contract recovery rate.
    pub recovery_rate: f64,
    /// Integration steps per year.
    pub num_steps_per_year: u32,
}

/// Risky PV01 of a premium leg per unit notional and unit coupon.
///
/// The first period pays its coupon on survival to the first payment date
/// plus, on default before it, the coupon already accrued at step-in and on
/// average half of the remainder. Later periods pay on survival plus an
/// accrued-on-default term chosen by `method`:
///
/// ```text
/// FlatHazard: q1 z1 h (1 - e^{-ατ} - ατ e^{-ατ}) / |α² + 1e-20|,  α = h + r
/// Linear:     0.5 (q1 - q2) z2 τ
/// ```
///
/// With no future payments the full RPV01 is zero.
#[must_use]
pub fn risky_pv01(inputs: &RiskyAnnuityInputs<'_>, method: IntegrationMethod) -> RiskyPv01 {
    let RiskyAnnuityInputs {
        t_eff,
        accrual_to_now,
        payment_times,
        accrual_factors,
        discount,
        survival,
    } = *inputs;

    let n = payment_times.len().min(accrual_factors.len());
    if n == 0 {
        return RiskyPv01 {
            full: 0.0,
            clean: -accrual_to_now,
        };
    }

    let t_ncd = payment_times[0];
    let af0 = accrual_factors[0];
    let q_eff = survival.at(t_eff);
    let mut q1 = survival.at(t_ncd);
    let mut z1 = discount.at(t_ncd);

    let mut full = q1 * z1 * af0;
    full += z1 * (q_eff - q1) * accrual_to_now;
    full += 0.5 * z1 * (q_eff - q1) * (af0 - accrual_to_now);

    for (&t2, &tau) in payment_times[1..n].iter().zip(&accrual_factors[1..n]) {
        let q2 = survival.at(t2);
        let z2 = discount.at(t2);

        full += q2 * z2 * tau;

        full += match method {
            IntegrationMethod::FlatHazard => {
                let h12 = -(q2 / q1).ln() / tau;
                let r12 = -(z2 / z1).ln() / tau;
                let alpha = h12 + r12;
                let decay = (-alpha * tau).exp();
                let exp_term = 1.0 - decay - alpha * tau * decay;
                q1 * z1 * h12 * exp_term / (alpha * alpha + RPV01_EPSILON).abs()
            }
            IntegrationMethod::Linear => 0.5 * (q1 - q2) * z2 * tau,
        };

        q1 = q2;
        z1 = z2;
    }

    RiskyPv01 {
        full,
        clean: full - accrual_to_now,
    }
}

/// Protection leg PV per unit notional.
///
/// `[t_eff, t_mat]` is cut into `round((t_mat - t_eff) * steps_per_year)`
/// equal steps. Each step contributes
///
/// ```text
/// FlatHazard: h (1 - e^{-(h+r)dt}) q1 z1 / (|h + r| + 1e-8)
/// Linear:     0.5 (z1 + z2) (q1 - q2)
/// ```
///
/// and the sum is scaled by `1 - recovery`. A leg shorter than half a step
/// is worth zero.
#[must_use]
pub fn protection_leg_pv(inputs: &ProtectionLegInputs<'_>, method: IntegrationMethod) -> f64 {
    let ProtectionLegInputs {
        t_eff,
        t_mat,
        discount,
        survival,
        recovery_rate,
        num_steps_per_year,
    } = *inputs;

    let span = t_mat - t_eff;
    let steps = (span * f64::from(num_steps_per_year) + 0.5).floor();
    if steps.is_nan() || steps < 1.0 {
        return 0.0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_steps = steps as usize;
    let dt = span / steps;

    let mut t = t_eff;
    let mut z1 = discount.at(t);
    let mut q1 = survival.at(t);
    let mut pv = 0.0;

    for _ in 0..num_steps {
        t += dt;
        let z2 = discount.at(t);
        let q2 = survival.at(t);

        pv += match method {
            IntegrationMethod::FlatHazard => {
                let h12 = -(q2 / q1).ln() / dt;
                let r12 = -(z2 / z1).ln() / dt;
                let decay = (-(h12 + r12) * dt).exp();
                h12 * (1.0 - decay) * q1 * z1 / ((h12 + r12).abs() + PROTECTION_EPSILON)
            }
            IntegrationMethod::Linear => 0.5 * (z1 + z2) * (q1 - q2),
        };

        q1 = q2;
        z1 = z2;
    }

    pv * (1.0 - recovery_rate)
}

/// Risky PV01 of many premium legs, in parallel.
#[cfg(feature = "parallel")]
#[must_use]
pub fn risky_pv01_batch(
    inputs: &[RiskyAnnuityInputs<'_>],
    method: IntegrationMethod,
) -> Vec<RiskyPv01> {
    use rayon::prelude::*;

    inputs.par_iter().map(|i| risky_pv01(i, method)).collect()
}

/// Risky PV01 of many premium legs (non-parallel fallback).
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn risky_pv01_batch(
    inputs: &[RiskyAnnuityInputs<'_>],
    method: IntegrationMethod,
) -> Vec<RiskyPv01> {
    inputs.iter().map(|i| risky_pv01(i, method)).collect()
}

/// Protection leg PVs of many contracts, in parallel.
#[cfg(feature = "parallel")]
#[must_use]
pub fn protection_leg_pv_batch(
    inputs: &[ProtectionLegInputs<'_>],
    method: IntegrationMethod,
) -> Vec<f64> {
    use rayon::prelude::*;

    inputs.par_iter().map(|i| protection_leg_pv(i, method)).collect()
}

/// Protection leg PVs of many contracts (non-parallel fallback).
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn protection_leg_pv_batch(
    inputs: &[ProtectionLegInputs<'_>],
    method: IntegrationMethod,
) -> Vec<f64> {
    inputs.iter().map(|i| protection_leg_pv(i, method)).collect()
}
