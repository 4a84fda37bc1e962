//! Core trait for term structures.
//!
//! Every curve in Hazard is a set of `(time, value)` nodes interpolated
//! flat-forward, where value is a discount factor or a survival
//! probability. Model time is `(date - value_date) / 365`.

use hazard_core::types::Date;
use hazard_core::DAYS_IN_YEAR;
use hazard_math::interpolation::flat_forward_interpolate;

/// A term structure of discount factors or survival probabilities.
///
/// Implementors expose their node arrays directly so numerical integrators
/// can work on plain slices.
pub trait TermStructure: Send + Sync {
    /// The curve's valuation date (model time zero).
    fn value_date(&self) -> Date;

    /// Node times in years, strictly increasing.
    fn times(&self) -> &[f64];

    /// Node values, index-aligned with [`times`](TermStructure::times).
    fn values(&self) -> &[f64];

    /// Model time of a date relative to the value date.
    fn time_of(&self, date: Date) -> f64 {
        self.value_date().days_between(&date) as f64 / DAYS_IN_YEAR
    }

    /// Flat-forward interpolated value at time `t`.
    fn value_at_time(&self, t: f64) -> f64 {
        flat_forward_interpolate(t, self.times(), self.values())
    }

    /// Flat-forward interpolated value at a date.
    fn value_at(&self, date: Date) -> f64 {
        self.value_at_time(self.time_of(date))
    }
}
