//! Single-curve Ibor discount curve bootstrapped from market instruments.

use serde::{Deserialize, Serialize};

use hazard_core::types::Date;
use hazard_core::DAYS_IN_YEAR;
use hazard_math::solvers::{bisection, brent, SolverConfig};

use crate::discount_curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{CurveInstrument, IborDeposit, IborFra, IborSwap};
use crate::traits::TermStructure;

/// Search interval for a node discount factor.
const DF_BRACKET: (f64, f64) = (1e-4, 2.0);

/// A discount curve together with the instruments it was calibrated to.
///
/// Keeping the instruments makes risk a pure rebuild: [`IborCurve::bumped`]
/// returns a new curve calibrated to shifted quotes and leaves `self`
/// untouched.
///
/// # Example
///
/// ```rust
/// use hazard_core::prelude::*;
/// use hazard_curves::prelude::*;
///
/// let vd = Date::from_ymd(2020, 6, 1).unwrap();
/// let deposits = vec![
///     IborDeposit::from_tenor(vd, "6M", 0.010, DayCountConvention::Act360).unwrap(),
/// ];
/// let swaps = vec![
///     IborSwap::from_tenor(vd, "2Y", SwapType::Pay, 0.012, Frequency::Annual,
///         DayCountConvention::Thirty360US).unwrap(),
/// ];
/// let curve = IborCurve::build(vd, deposits, vec![], swaps).unwrap();
/// let bumped = curve.bumped(0.0001).unwrap();
/// assert!(bumped.df(2.0) < curve.df(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IborCurve {
    deposits: Vec<IborDeposit>,
    fras: Vec<IborFra>,
    swaps: Vec<IborSwap>,
    curve: DiscountCurve,
}

impl IborCurve {
    /// Bootstraps a curve from deposits, FRAs and swaps.
    ///
    /// Instruments are sorted by maturity and each adds one node whose
    /// discount factor is solved so that the instrument prices to zero on
    /// the curve built so far.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidData` when no instruments are given, an
    /// instrument matures on or before the value date, or two instruments
    /// share a maturity. Returns `CurveError::BootstrapFailed` if a node
    /// cannot be solved.
    pub fn build(
        value_date: Date,
        deposits: Vec<IborDeposit>,
        fras: Vec<IborFra>,
        swaps: Vec<IborSwap>,
    ) -> CurveResult<Self> {
        let curve = bootstrap(value_date, &deposits, &fras, &swaps)?;
        Ok(Self {
            deposits,
            fras,
            swaps,
            curve,
        })
    }

    /// Wraps a fixed discount curve with no calibration instruments.
    ///
    /// Bumping such a curve rebuilds it unchanged.
    #[must_use]
    pub fn from_discount_curve(curve: DiscountCurve) -> Self {
        Self {
            deposits: Vec::new(),
            fras: Vec::new(),
            swaps: Vec::new(),
            curve,
        }
    }

    /// Returns a new curve rebuilt with every quote shifted by `bump`.
    ///
    /// Deposit and FRA rates move by `bump`. Swap coupons move by `bump`
    /// with fixed-leg payments rescaled rather than regenerated.
    pub fn bumped(&self, bump: f64) -> CurveResult<Self> {
        if !self.has_instruments() {
            return Ok(self.clone());
        }

        log::debug!(
            "rebuilding ibor curve at {} with {:+.6} rate bump",
            self.curve.value_date(),
            bump
        );

        Self::build(
            self.curve.value_date(),
            self.deposits.iter().map(|d| d.with_bumped_rate(bump)).collect(),
            self.fras.iter().map(|f| f.with_bumped_rate(bump)).collect(),
            self.swaps.iter().map(|s| s.with_bumped_coupon(bump)).collect(),
        )
    }

    /// Discount factor at time `t` in years.
    #[must_use]
    pub fn df(&self, t: f64) -> f64 {
        self.curve.df(t)
    }

    /// Discount factor at a date.
    #[must_use]
    pub fn df_at(&self, date: Date) -> f64 {
        self.curve.df_at(date)
    }

    /// Returns the underlying discount curve.
    #[must_use]
    pub fn discount_curve(&self) -> &DiscountCurve {
        &self.curve
    }

    /// Returns the calibration deposits.
    #[must_use]
    pub fn deposits(&self) -> &[IborDeposit] {
        &self.deposits
    }

    /// Returns the calibration FRAs.
    #[must_use]
    pub fn fras(&self) -> &[IborFra] {
        &self.fras
    }

    /// Returns the calibration swaps.
    #[must_use]
    pub fn swaps(&self) -> &[IborSwap] {
        &self.swaps
    }

    fn has_instruments(&self) -> bool {
        !(self.deposits.is_empty() && self.fras.is_empty() && self.swaps.is_empty())
    }
}

impl TermStructure for IborCurve {
    fn value_date(&self) -> Date {
        self.curve.value_date()
    }

    fn times(&self) -> &[f64] {
        self.curve.times()
    }

    fn values(&self) -> &[f64] {
        self.curve.values()
    }
}

fn bootstrap(
    value_date: Date,
    deposits: &[IborDeposit],
    fras: &[IborFra],
    swaps: &[IborSwap],
) -> CurveResult<DiscountCurve> {
    let mut instruments: Vec<&dyn CurveInstrument> = Vec::new();
    instruments.extend(deposits.iter().map(|d| d as &dyn CurveInstrument));
    instruments.extend(fras.iter().map(|f| f as &dyn CurveInstrument));
    instruments.extend(swaps.iter().map(|s| s as &dyn CurveInstrument));

    if instruments.is_empty() {
        return Err(CurveError::invalid_data("no instruments provided for bootstrap"));
    }

    instruments.sort_by_key(|inst| inst.maturity_date());

    let mut times = vec![0.0];
    let mut dfs = vec![1.0];
    let config = SolverConfig::default();

    for instrument in instruments {
        let maturity = instrument.maturity_date();
        let t = value_date.days_between(&maturity) as f64 / DAYS_IN_YEAR;

        if t <= 0.0 {
            return Err(CurveError::invalid_data(format!(
                "{} matures on or before value date {value_date}",
                instrument.description()
            )));
        }
        if times.last().is_some_and(|&last| t <= last) {
            return Err(CurveError::invalid_data(format!(
                "{} duplicates an existing curve node",
                instrument.description()
            )));
        }

        let objective = |df: f64| {
            let mut trial_times = times.clone();
            let mut trial_dfs = dfs.clone();
            trial_times.push(t);
            trial_dfs.push(df);
            let trial = DiscountCurve::from_nodes_unchecked(value_date, trial_times, trial_dfs);
            instrument.value(value_date, &trial)
        };

        let solved = brent(objective, DF_BRACKET.0, DF_BRACKET.1, &config).or_else(|err| {
            log::debug!(
                "brent failed for {}: {err}, retrying with bisection",
                instrument.description()
            );
            bisection(objective, DF_BRACKET.0, DF_BRACKET.1, &config)
        });

        let df = solved
            .map_err(|err| CurveError::bootstrap_failed(instrument.description(), err.to_string()))?
            .root;

        times.push(t);
        dfs.push(df);
    }

    log::debug!(
        "bootstrapped ibor curve at {value_date} with {} nodes",
        times.len()
    );

    DiscountCurve::new(value_date, times, dfs)
}
