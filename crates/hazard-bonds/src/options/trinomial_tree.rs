//! Recombining trinomial lattice for mean-reverting short rate models.
//!
//! Nodes sit on a uniform grid `x = j * dx` with `dx = σ√(3Δt)`. Branching
//! is standard (`j+1, j, j-1`) in the interior and switches to the
//! down-pointing or up-pointing pattern at `|j| = jmax` so the lattice stays
//! bounded:
//!
//! ```text
//!   top (j = jmax):     j, j-1, j-2
//!   interior:           j+1, j, j-1
//!   bottom (j = -jmax): j+2, j+1, j
//! ```
//!
//! The rate at node `(m, j)` is `α(m) + j·dx`. The shifts `α(m)` are solved
//! step by step with Arrow-Debreu prices so the lattice reprices every
//! zero-coupon bond on the input curve at the grid times.

use hazard_math::interpolation::{flat_forward_interpolate, validate_nodes};

use crate::error::{BondError, BondResult};

/// Branching cutoff constant: `jmax = ceil(0.1835 / (a·Δt))`.
const JMAX_FACTOR: f64 = 0.1835;

/// A calibrated trinomial short rate lattice.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    dt: f64,
    dx: f64,
    jmax: usize,

    /// Half-width of the node arrays, `min(jmax, steps + 1)`.
    width: usize,

    /// Grid times `m·Δt` for `m = 0..=steps + 1`.
    times: Vec<f64>,

    /// Rate shift per step, `m = 0..=steps`.
    alpha: Vec<f64>,

    /// Arrow-Debreu prices per step and node index.
    arrow_debreu: Vec<Vec<f64>>,

    /// `[up, mid, down]` branch probabilities per node index.
    probabilities: Vec<[f64; 3]>,

    curve_times: Vec<f64>,
    curve_dfs: Vec<f64>,
}

impl TrinomialTree {
    /// Builds a lattice with `num_steps` steps out to `time_to_maturity` and
    /// fits it to the curve by forward induction.
    ///
    /// One extra step beyond maturity is built so the last step's rate shift
    /// is determined.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidArgument` for non-positive maturity or step count
    /// - `BondError::InvalidConfiguration` for non-positive model parameters
    /// - `BondError::Math` if the curve nodes are malformed
    /// - `BondError::NumericalFailure` if a rate shift cannot be solved
    pub fn calibrate(
        mean_reversion: f64,
        volatility: f64,
        time_to_maturity: f64,
        num_steps: usize,
        curve_times: &[f64],
        curve_dfs: &[f64],
    ) -> BondResult<Self> {
        if !(time_to_maturity.is_finite() && time_to_maturity > 0.0) {
            return Err(BondError::invalid_argument(format!(
                "tree maturity must be positive, got {time_to_maturity}"
            )));
        }
        if num_steps == 0 {
            return Err(BondError::invalid_argument("tree needs at least one step"));
        }
        if !(mean_reversion.is_finite() && mean_reversion > 0.0) {
            return Err(BondError::invalid_configuration(format!(
                "mean reversion must be positive, got {mean_reversion}"
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(BondError::invalid_configuration(format!(
                "volatility must be positive, got {volatility}"
            )));
        }
        validate_nodes(curve_times, curve_dfs, false)?;

        let dt = time_to_maturity / num_steps as f64;
        let dx = volatility * (3.0 * dt).sqrt();
        let jmax = ((JMAX_FACTOR / (mean_reversion * dt)).ceil() as usize).max(1);
        let width = jmax.min(num_steps + 1);
        let num_nodes = 2 * width + 1;

        let times: Vec<f64> = (0..=num_steps + 1).map(|m| m as f64 * dt).collect();

        let probabilities = (0..num_nodes)
            .map(|i| {
                let j = i as i64 - width as i64;
                branch_probabilities(j, jmax, mean_reversion, dt)
            })
            .collect();

        let mut tree = Self {
            dt,
            dx,
            jmax,
            width,
            times,
            alpha: Vec::with_capacity(num_steps + 1),
            arrow_debreu: vec![vec![0.0; num_nodes]; num_steps + 2],
            probabilities,
            curve_times: curve_times.to_vec(),
            curve_dfs: curve_dfs.to_vec(),
        };
        tree.forward_induction()?;

        log::debug!(
            "Trinomial tree: {} steps, dt {:.6}, dx {:.6}, jmax {}",
            num_steps,
            dt,
            dx,
            jmax
        );

        Ok(tree)
    }

    fn forward_induction(&mut self) -> BondResult<()> {
        let (width, jmax, dx, dt) = (self.width, self.jmax, self.dx, self.dt);
        self.arrow_debreu[0][width] = 1.0;

        for m in 0..=self.num_steps() {
            let reach = self.reach(m);
            let df_next = self.curve_df(self.times[m + 1]);

            let (head, tail) = self.arrow_debreu.split_at_mut(m + 1);
            let current = &head[m];
            let next = &mut tail[0];

            let sum: f64 = (-reach..=reach)
                .map(|j| current[node_index(width, j)] * (-(j as f64) * dx * dt).exp())
                .sum();
            if !(sum > 0.0 && df_next > 0.0) {
                return Err(BondError::numerical_failure(format!(
                    "cannot fit rate shift at step {m}"
                )));
            }
            let alpha = (sum / df_next).ln() / dt;

            for j in -reach..=reach {
                let price = current[node_index(width, j)];
                if price == 0.0 {
                    continue;
                }
                let discount = (-(alpha + j as f64 * dx) * dt).exp();
                let probs = &self.probabilities[node_index(width, j)];
                for (k, p) in successors(j, jmax, probs) {
                    next[node_index(width, k)] += price * p * discount;
                }
            }
            self.alpha.push(alpha);
        }
        Ok(())
    }

    /// Number of steps to maturity.
    #[must_use]
    pub fn num_steps(&self) -> usize {
        self.times.len() - 2
    }

    /// Number of node slots per step.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        2 * self.width + 1
    }

    /// Time step in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Rate grid spacing.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Branching cutoff.
    #[must_use]
    pub fn jmax(&self) -> usize {
        self.jmax
    }

    /// Grid time of step `m`.
    #[must_use]
    pub fn time(&self, m: usize) -> f64 {
        self.times[m]
    }

    /// Tree maturity (time of the last priced step).
    #[must_use]
    pub fn maturity(&self) -> f64 {
        self.times[self.num_steps()]
    }

    /// Largest `|j|` occupied at step `m`.
    #[must_use]
    pub fn reach(&self, m: usize) -> i64 {
        m.min(self.width) as i64
    }

    /// Array index of node `j`.
    #[must_use]
    pub fn node_index(&self, j: i64) -> usize {
        node_index(self.width, j)
    }

    /// Short rate at node `(m, j)` over the step `[t_m, t_{m+1}]`.
    #[must_use]
    pub fn short_rate(&self, m: usize, j: i64) -> f64 {
        self.alpha[m] + j as f64 * self.dx
    }

    /// One-step discount factor at node `(m, j)`.
    #[must_use]
    pub fn discount(&self, m: usize, j: i64) -> f64 {
        (-self.short_rate(m, j) * self.dt).exp()
    }

    /// Arrow-Debreu prices at step `m`, indexed by [`node_index`](Self::node_index).
    #[must_use]
    pub fn arrow_debreu(&self, m: usize) -> &[f64] {
        &self.arrow_debreu[m]
    }

    /// Successor nodes of `j` with their transition probabilities.
    #[must_use]
    pub fn successors(&self, j: i64) -> [(i64, f64); 3] {
        successors(j, self.jmax, &self.probabilities[node_index(self.width, j)])
    }

    /// Discount factor of the calibration curve at time `t`.
    #[must_use]
    pub fn curve_df(&self, t: f64) -> f64 {
        flat_forward_interpolate(t, &self.curve_times, &self.curve_dfs)
    }
}

fn node_index(width: usize, j: i64) -> usize {
    (j + width as i64) as usize
}

fn successors(j: i64, jmax: usize, probs: &[f64; 3]) -> [(i64, f64); 3] {
    let [pu, pm, pd] = *probs;
    let jmax = jmax as i64;
    if j == jmax {
        [(j, pu), (j - 1, pm), (j - 2, pd)]
    } else if j == -jmax {
        [(j + 2, pu), (j + 1, pm), (j, pd)]
    } else {
        [(j + 1, pu), (j, pm), (j - 1, pd)]
    }
}

/// Branch probabilities matching the mean reverting drift `-a·j·Δt` and the
/// variance of the rate increment.
fn branch_probabilities(j: i64, jmax: usize, a: f64, dt: f64) -> [f64; 3] {
    let x = a * j as f64 * dt;
    let x2 = x * x;
    let jmax = jmax as i64;
    if j == jmax {
        [
            7.0 / 6.0 + 0.5 * (x2 - 3.0 * x),
            -1.0 / 3.0 - x2 + 2.0 * x,
            1.0 / 6.0 + 0.5 * (x2 - x),
        ]
    } else if j == -jmax {
        [
            1.0 / 6.0 + 0.5 * (x2 + x),
            -1.0 / 3.0 - x2 - 2.0 * x,
            7.0 / 6.0 + 0.5 * (x2 + 3.0 * x),
        ]
    } else {
        [
            1.0 / 6.0 + 0.5 * (x2 - x),
            2.0 / 3.0 - x2,
            1.0 / 6.0 + 0.5 * (x2 + x),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_curve(rate: f64) -> (Vec<f64>, Vec<f64>) {
        let times = vec![0.0, 1.0, 5.0, 10.0];
        let dfs = times.iter().map(|t| (-rate * t).exp()).collect();
        (times, dfs)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        // ceil(0.1835 / (0.1 * 0.25)) = 8
        for j in -8..=8 {
            let p = branch_probabilities(j, 8, 0.1, 0.25);
            assert_relative_eq!(p[0] + p[1] + p[2], 1.0, epsilon = 1e-14);
            assert!(p.iter().all(|x| *x > 0.0));
        }
    }

    #[test]
    fn test_branching_matches_drift() {
        // Expected move in units of dx is -a j dt at every node
        let (a, dt, jmax) = (0.1, 0.25, 8);
        for j in -8..=8 {
            let probs = branch_probabilities(j, jmax, a, dt);
            let drift: f64 = successors(j, jmax, &probs)
                .iter()
                .map(|(k, p)| (k - j) as f64 * p)
                .sum();
            assert_relative_eq!(drift, -a * j as f64 * dt, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reprices_zero_coupon_bonds() {
        let times = vec![0.5, 1.0, 3.0, 6.0];
        let dfs = vec![0.985, 0.97, 0.90, 0.78];
        let tree = TrinomialTree::calibrate(0.05, 0.01, 5.0, 50, &times, &dfs).unwrap();

        for m in 0..=tree.num_steps() + 1 {
            let total: f64 = tree.arrow_debreu(m).iter().sum();
            let expected = flat_forward_interpolate(tree.time(m), &times, &dfs);
            assert_relative_eq!(total, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flat_curve_first_rate() {
        let (times, dfs) = flat_curve(0.05);
        let tree = TrinomialTree::calibrate(0.1, 0.01, 2.0, 20, &times, &dfs).unwrap();
        assert_relative_eq!(tree.short_rate(0, 0), 0.05, epsilon = 1e-12);
        assert_eq!(tree.num_steps(), 20);
        assert_relative_eq!(tree.maturity(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lattice_is_bounded() {
        let (times, dfs) = flat_curve(0.03);
        let tree = TrinomialTree::calibrate(0.5, 0.01, 10.0, 100, &times, &dfs).unwrap();
        // ceil(0.1835 / (0.5 * 0.1)) = 4
        assert_eq!(tree.jmax(), 4);
        assert_eq!(tree.num_nodes(), 9);
        assert_eq!(tree.reach(50), 4);
    }

    #[test]
    fn test_invalid_inputs() {
        let (times, dfs) = flat_curve(0.03);
        assert!(matches!(
            TrinomialTree::calibrate(0.1, 0.01, 0.0, 10, &times, &dfs),
            Err(BondError::InvalidArgument { .. })
        ));
        assert!(matches!(
            TrinomialTree::calibrate(0.1, 0.01, 1.0, 0, &times, &dfs),
            Err(BondError::InvalidArgument { .. })
        ));
        assert!(matches!(
            TrinomialTree::calibrate(0.0, 0.01, 1.0, 10, &times, &dfs),
            Err(BondError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            TrinomialTree::calibrate(0.1, 0.01, 1.0, 10, &[1.0, 0.5], &[0.99, 0.98]),
            Err(BondError::Math(_))
        ));
    }
}
