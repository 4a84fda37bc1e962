//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half that still contains a
/// sign change. Slow but cannot fail once the root is bracketed.
///
/// # Example
///
/// ```rust
/// use hazard_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = 0.5 * (lo + hi);
    log::debug!(
        "bisection: no convergence after {} iterations, bracket [{lo}, {hi}]",
        config.max_iterations
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
