//! Flat forward interpolation.
//!
//! Flat forward interpolation assumes a constant instantaneous forward rate
//! between adjacent nodes. For a discount factor (or survival probability)
//! `v(t)` this means `-ln v(t)` is linear in `t` between nodes:
//!
//! ```text
//! -ln v(t) = ((t - t_i) * (-ln v_{i+1}) + (t_{i+1} - t) * (-ln v_i)) / (t_{i+1} - t_i)
//! ```
//!
//! Outside the node range the zero rate of the nearest node is held
//! constant, i.e. `v(t) = exp(ln(v_k) * t / t_k)`.

use crate::error::{MathError, MathResult};

/// Interpolates a discount factor or survival probability at time `t`.
///
/// `times` must be sorted ascending and index-aligned with `values`; all
/// values must be strictly positive. An empty node set gives `1.0`.
///
/// # Example
///
/// ```rust
/// use hazard_math::interpolation::flat_forward_interpolate;
///
/// let times = [0.0, 1.0, 2.0];
/// let dfs = [1.0, (-0.02f64).exp(), (-0.05f64).exp()];
///
/// // Forward rate is 3% between 1Y and 2Y
/// let df = flat_forward_interpolate(1.5, &times, &dfs);
/// assert!((df - (-0.035f64).exp()).abs() < 1e-14);
/// ```
#[inline]
#[must_use]
pub fn flat_forward_interpolate(t: f64, times: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(times.len(), values.len());

    let n = times.len().min(values.len());
    if n == 0 {
        return 1.0;
    }
    if t.is_nan() {
        return f64::NAN;
    }

    let t0 = times[0];
    if t == t0 {
        return values[0];
    }

    if t < t0 {
        // A node at time zero carries no rate information to extrapolate
        if t0 <= 0.0 {
            return values[0];
        }
        return (values[0].ln() * t / t0).exp();
    }

    // First node with time >= t
    let i = times[..n].partition_point(|&x| x < t);

    if i >= n {
        let t_last = times[n - 1];
        if t_last <= 0.0 {
            return values[n - 1];
        }
        return (values[n - 1].ln() * t / t_last).exp();
    }

    let (t1, t2) = (times[i - 1], times[i]);
    let rt1 = -values[i - 1].ln();
    let rt2 = -values[i].ln();
    let rt = ((t - t1) * rt2 + (t2 - t) * rt1) / (t2 - t1);
    (-rt).exp()
}

/// Checks that node arrays are usable by [`flat_forward_interpolate`].
///
/// # Errors
///
/// Returns `MathError` if the arrays are empty, differ in length, times are
/// not strictly increasing, or any value lies outside `(0, 1]` when
/// `bounded` is set (or is non-positive otherwise).
pub fn validate_nodes(times: &[f64], values: &[f64], bounded: bool) -> MathResult<()> {
    if times.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if times.len() != values.len() {
        return Err(MathError::invalid_input(format!(
            "times and values must have same length: {} vs {}",
            times.len(),
            values.len()
        )));
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input("node times must be strictly increasing"));
    }
    if let Some(&bad) = values
        .iter()
        .find(|&&v| !(v > 0.0 && v.is_finite()) || (bounded && v > 1.0 + 1e-12))
    {
        return Err(MathError::invalid_input(format!("invalid node value {bad}")));
    }
    Ok(())
}
