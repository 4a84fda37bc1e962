//! Flat-forward discount curve.

use serde::{Deserialize, Serialize};

use hazard_core::types::Date;
use hazard_core::DAYS_IN_YEAR;
use hazard_math::interpolation::validate_nodes;

use crate::error::{CurveError, CurveResult};
use crate::traits::TermStructure;

/// An immutable discount curve defined by `(time, discount factor)` nodes.
///
/// Values between nodes are interpolated flat-forward; outside the nodes the
/// nearest node's zero rate is held constant.
///
/// # Example
///
/// ```rust
/// use hazard_core::types::Date;
/// use hazard_curves::{DiscountCurve, TermStructure};
///
/// let value_date = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = DiscountCurve::flat(value_date, 0.05).unwrap();
///
/// assert!((curve.df(2.0) - (-0.10f64).exp()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    value_date: Date,
    times: Vec<f64>,
    dfs: Vec<f64>,
}

impl DiscountCurve {
    /// Creates a curve from node times (years) and discount factors.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Math` if the nodes are empty, mismatched, not
    /// strictly increasing, or contain non-positive discount factors.
    pub fn new(value_date: Date, times: Vec<f64>, dfs: Vec<f64>) -> CurveResult<Self> {
        validate_nodes(&times, &dfs, false)?;
        Ok(Self {
            value_date,
            times,
            dfs,
        })
    }

    /// Creates a curve from node dates and discount factors.
    pub fn from_dates(value_date: Date, dates: &[Date], dfs: Vec<f64>) -> CurveResult<Self> {
        let times = dates
            .iter()
            .map(|d| value_date.days_between(d) as f64 / DAYS_IN_YEAR)
            .collect();
        Self::new(value_date, times, dfs)
    }

    /// Creates a flat curve with a continuously compounded rate.
    pub fn flat(value_date: Date, rate: f64) -> CurveResult<Self> {
        if !rate.is_finite() {
            return Err(CurveError::invalid_data(format!("invalid flat rate {rate}")));
        }
        Self::new(value_date, vec![0.0, 1.0], vec![1.0, (-rate).exp()])
    }

    /// Creates a curve without validating the nodes.
    ///
    /// Used by bootstrappers that only ever append valid nodes.
    pub(crate) fn from_nodes_unchecked(value_date: Date, times: Vec<f64>, dfs: Vec<f64>) -> Self {
        Self {
            value_date,
            times,
            dfs,
        }
    }

    /// Discount factor at time `t` (years from the value date).
    #[must_use]
    pub fn df(&self, t: f64) -> f64 {
        self.value_at_time(t)
    }

    /// Discount factor at a date.
    #[must_use]
    pub fn df_at(&self, date: Date) -> f64 {
        self.value_at(date)
    }

    /// Continuously compounded zero rate at time `t`.
    ///
    /// Returns the first node's rate for `t <= 0`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        let t = if t > 0.0 { t } else { 1e-6 };
        -self.df(t).ln() / t
    }

    /// Returns the discount factors at the nodes.
    #[must_use]
    pub fn dfs(&self) -> &[f64] {
        &self.dfs
    }
}

impl TermStructure for DiscountCurve {
    fn value_date(&self) -> Date {
        self.value_date
    }

    fn times(&self) -> &[f64] {
        &self.times
    }

    fn values(&self) -> &[f64] {
        &self.dfs
    }
}
