//! Issuer survival curve bootstrapped from CDS quotes.

use serde::{Deserialize, Serialize};

use hazard_core::types::Date;
use hazard_core::DAYS_IN_YEAR;
use hazard_curves::{IborCurve, TermStructure};
use hazard_math::interpolation::validate_nodes;
use hazard_math::solvers::{brent, SolverConfig};
use hazard_math::MathError;

use crate::cds::{Cds, PricingCurves};
use crate::config::CdsPricingConfig;
use crate::error::{CreditError, CreditResult};
use crate::integrators::CurveNodes;

/// Smallest survival probability a node may take.
const MIN_SURVIVAL: f64 = 1e-12;

/// Convergence tolerance on a node, solved against clean value per unit
/// notional.
const SURVIVAL_TOLERANCE: f64 = 1e-14;
const MAX_SOLVER_ITERATIONS: u32 = 200;

/// Survival probabilities of a reference entity, bound to the Ibor curve
/// used for discounting and to the recovery rate assumed in calibration.
///
/// A curve built from CDS quotes keeps those contracts, so credit and
/// interest rate risk are computed by rebuilding from shifted inputs
/// rather than by editing an existing curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerCurve {
    value_date: Date,
    times: Vec<f64>,
    values: Vec<f64>,
    recovery_rate: f64,
    ibor_curve: IborCurve,
    cds_contracts: Vec<Cds>,
    config: CdsPricingConfig,
}

impl IssuerCurve {
    /// Bootstraps survival nodes so that every contract has zero clean
    /// value.
    ///
    /// Contracts are sorted by maturity and each adds one node at its
    /// maturity time.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidArgument` for an empty contract list, a
    /// recovery rate outside `[0, 1)`, or contracts that mature on or before
    /// the value date or share a maturity. Returns
    /// `CreditError::NumericalFailure` if a node cannot be bracketed, which
    /// happens when a quote needs a negative forward hazard, or solved.
    pub fn build(
        value_date: Date,
        cds_contracts: Vec<Cds>,
        recovery_rate: f64,
        ibor_curve: IborCurve,
        config: CdsPricingConfig,
    ) -> CreditResult<Self> {
        config.validate()?;
        check_recovery(recovery_rate)?;

        if cds_contracts.is_empty() {
            return Err(CreditError::invalid_argument(
                "issuer curve needs at least one CDS contract",
            ));
        }

        let mut cds_contracts = cds_contracts;
        cds_contracts.sort_by_key(Cds::maturity_date);

        let (times, values) =
            bootstrap(value_date, &cds_contracts, recovery_rate, &ibor_curve, &config)?;

        log::debug!(
            "built issuer curve at {value_date} from {} contracts, recovery {recovery_rate}",
            cds_contracts.len()
        );

        Ok(Self {
            value_date,
            times,
            values,
            recovery_rate,
            ibor_curve,
            cds_contracts,
            config,
        })
    }

    /// Creates a curve from explicit survival nodes.
    ///
    /// The curve carries no contracts, so [`with_bumped_coupons`] returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Math` if the nodes are empty, mismatched, not
    /// strictly increasing or outside `(0, 1]`, and
    /// `CreditError::InvalidArgument` for a recovery rate outside `[0, 1)`.
    ///
    /// [`with_bumped_coupons`]: IssuerCurve::with_bumped_coupons
    pub fn from_nodes(
        value_date: Date,
        times: Vec<f64>,
        values: Vec<f64>,
        recovery_rate: f64,
        ibor_curve: IborCurve,
    ) -> CreditResult<Self> {
        validate_nodes(&times, &values, true)?;
        check_recovery(recovery_rate)?;
        Ok(Self {
            value_date,
            times,
            values,
            recovery_rate,
            ibor_curve,
            cds_contracts: Vec::new(),
            config: CdsPricingConfig::default(),
        })
    }

    /// Returns a new curve calibrated to every contract's coupon plus
    /// `bump`.
    pub fn with_bumped_coupons(&self, bump: f64) -> CreditResult<Self> {
        if self.cds_contracts.is_empty() {
            log::warn!("issuer curve has no contracts to bump, credit risk will be zero");
            return Ok(self.clone());
        }

        log::debug!("rebuilding issuer curve with {bump:+.6} coupon bump");

        let bumped = self
            .cds_contracts
            .iter()
            .map(|cds| cds.with_running_coupon(cds.running_coupon() + bump))
            .collect();

        Self::build(
            self.value_date,
            bumped,
            self.recovery_rate,
            self.ibor_curve.clone(),
            self.config,
        )
    }

    /// Returns a new curve whose Ibor curve is rebuilt from quotes shifted
    /// by `bump`, recalibrated to the same contracts.
    pub fn with_bumped_ibor(&self, bump: f64) -> CreditResult<Self> {
        let ibor_curve = self.ibor_curve.bumped(bump)?;

        if self.cds_contracts.is_empty() {
            return Ok(Self {
                ibor_curve,
                ..self.clone()
            });
        }

        Self::build(
            self.value_date,
            self.cds_contracts.clone(),
            self.recovery_rate,
            ibor_curve,
            self.config,
        )
    }

    /// Survival probability to time `t` in years.
    #[must_use]
    pub fn survival_probability(&self, t: f64) -> f64 {
        self.value_at_time(t)
    }

    /// Survival probability to a date.
    #[must_use]
    pub fn survival_probability_at(&self, date: Date) -> f64 {
        self.value_at(date)
    }

    /// Discount factor at time `t` from the bound Ibor curve.
    #[must_use]
    pub fn df(&self, t: f64) -> f64 {
        self.ibor_curve.df(t)
    }

    /// Discount factor at a date from the bound Ibor curve.
    #[must_use]
    pub fn df_at(&self, date: Date) -> f64 {
        self.ibor_curve.df_at(date)
    }

    /// Recovery rate assumed in calibration.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// The discounting curve.
    #[must_use]
    pub fn ibor_curve(&self) -> &IborCurve {
        &self.ibor_curve
    }

    /// Contracts the curve was calibrated to, sorted by maturity.
    #[must_use]
    pub fn cds_contracts(&self) -> &[Cds] {
        &self.cds_contracts
    }

    pub(crate) fn pricing_curves(&self) -> PricingCurves<'_> {
        PricingCurves {
            discount: CurveNodes::new(self.ibor_curve.times(), self.ibor_curve.values()),
            survival: CurveNodes::new(&self.times, &self.values),
        }
    }
}

impl TermStructure for IssuerCurve {
    fn value_date(&self) -> Date {
        self.value_date
    }

    fn times(&self) -> &[f64] {
        &self.times
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

fn check_recovery(recovery_rate: f64) -> CreditResult<()> {
    if (0.0..1.0).contains(&recovery_rate) {
        Ok(())
    } else {
        Err(CreditError::invalid_argument(format!(
            "recovery rate {recovery_rate} outside [0, 1)"
        )))
    }
}

fn bootstrap(
    value_date: Date,
    contracts: &[Cds],
    recovery_rate: f64,
    ibor_curve: &IborCurve,
    config: &CdsPricingConfig,
) -> CreditResult<(Vec<f64>, Vec<f64>)> {
    let mut times = vec![0.0];
    let mut values = vec![1.0];
    let solver = SolverConfig::new(SURVIVAL_TOLERANCE, MAX_SOLVER_ITERATIONS);
    let discount = CurveNodes::new(ibor_curve.times(), ibor_curve.values());

    for cds in contracts {
        let t = (cds.maturity_date() - value_date) as f64 / DAYS_IN_YEAR;
        if times.last().is_some_and(|&last| t <= last) {
            return Err(CreditError::invalid_argument(format!(
                "{cds} does not extend the curve beyond t = {:.6}",
                times.last().copied().unwrap_or_default()
            )));
        }

        let objective = |q: f64| {
            let mut trial_times = times.clone();
            let mut trial_values = values.clone();
            trial_times.push(t);
            trial_values.push(q);
            let curves = PricingCurves {
                discount,
                survival: CurveNodes::new(&trial_times, &trial_values),
            };
            cds.value_on(value_date, curves, recovery_rate, config).clean_pv / cds.notional()
        };

        // Above the previous node the forward hazard turns negative
        let upper = values.last().copied().unwrap_or(1.0);
        let q = brent(objective, MIN_SURVIVAL, upper, &solver)
            .map_err(|err| match err {
                MathError::InvalidBracket { .. } => CreditError::numerical_failure(format!(
                    "cannot bracket survival probability for {cds}: {err}"
                )),
                other => CreditError::numerical_failure(format!(
                    "survival solve failed for {cds}: {other}"
                )),
            })?
            .root;

        times.push(t);
        values.push(q);
    }

    Ok((times, values))
}
