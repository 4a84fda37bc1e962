//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints).
///
/// # Example
///
/// ```rust
/// use hazard_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    if fb == 0.0 {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // c is the contrapoint: f(b) and f(c) always bracket the root
    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let m = 0.5 * (c - b);

        if m.abs() <= tol || fb.abs() < config.tolerance {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * m * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let min1 = 3.0 * m * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
    }

    log::debug!(
        "brent: no convergence after {} iterations, last point {b} (residual {fb:.2e})",
        config.max_iterations
    );
    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}
