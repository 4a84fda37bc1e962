//! Hull-White one-factor short rate model on a trinomial lattice.
//!
//! The Hull-White model is defined by:
//!
//! ```text
//! dr = (θ(t) - a*r)dt + σ*dW
//! ```
//!
//! Where:
//! - `a` = mean reversion speed
//! - `σ` = volatility
//! - `θ(t)` = time-dependent drift, fitted numerically by the lattice's
//!   per-step rate shifts rather than in closed form

use serde::{Deserialize, Serialize};

use hazard_core::types::ExerciseStyle;

use crate::error::{BondError, BondResult};
use crate::options::short_rate::{CallPutValues, ShortRateTreeModel};
use crate::options::trinomial_tree::TrinomialTree;

/// Default mean reversion speed.
pub const DEFAULT_MEAN_REVERSION: f64 = 0.03;

/// Default short rate volatility.
pub const DEFAULT_VOLATILITY: f64 = 0.01;

/// Default number of lattice steps to bond maturity.
pub const DEFAULT_NUM_TIME_STEPS: usize = 100;

fn default_mean_reversion() -> f64 {
    DEFAULT_MEAN_REVERSION
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

fn default_num_time_steps() -> usize {
    DEFAULT_NUM_TIME_STEPS
}

/// Hull-White lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteConfig {
    /// Mean reversion speed (a).
    #[serde(default = "default_mean_reversion")]
    pub mean_reversion: f64,

    /// Short rate volatility (σ).
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Lattice steps between the valuation date and bond maturity.
    #[serde(default = "default_num_time_steps")]
    pub num_time_steps: usize,
}

impl Default for HullWhiteConfig {
    fn default() -> Self {
        Self {
            mean_reversion: DEFAULT_MEAN_REVERSION,
            volatility: DEFAULT_VOLATILITY,
            num_time_steps: DEFAULT_NUM_TIME_STEPS,
        }
    }
}

impl HullWhiteConfig {
    /// Checks that the parameters describe a usable lattice.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidConfiguration` for a non-positive mean
    /// reversion, volatility or step count.
    pub fn validate(&self) -> BondResult<()> {
        if !(self.mean_reversion.is_finite() && self.mean_reversion > 0.0) {
            return Err(BondError::invalid_configuration(format!(
                "mean reversion must be positive, got {}",
                self.mean_reversion
            )));
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(BondError::invalid_configuration(format!(
                "volatility must be positive, got {}",
                self.volatility
            )));
        }
        if self.num_time_steps == 0 {
            return Err(BondError::invalid_configuration(
                "number of time steps must be positive",
            ));
        }
        Ok(())
    }
}

/// Hull-White trinomial tree model for bond options.
///
/// # Example
///
/// ```rust
/// use hazard_bonds::options::{HullWhiteTree, ShortRateTreeModel};
/// use hazard_core::types::ExerciseStyle;
///
/// let model = HullWhiteTree::new(0.05, 0.01, 200).unwrap();
///
/// // Flat 4% curve, 5 year zero-coupon bond, option expiring in 2 years
/// let times = [0.0, 10.0];
/// let dfs = [1.0, (-0.4f64).exp()];
/// let tree = model.build_tree(5.0, &times, &dfs).unwrap();
///
/// let values = model
///     .bond_option(&tree, 2.0, 90.0, 100.0, &[5.0], &[0.0], ExerciseStyle::European)
///     .unwrap();
/// assert!(values.call > 0.0 && values.put >= 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HullWhiteTree {
    config: HullWhiteConfig,
}

impl HullWhiteTree {
    /// Creates a model from its parameters.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidConfiguration` for invalid parameters.
    pub fn new(mean_reversion: f64, volatility: f64, num_time_steps: usize) -> BondResult<Self> {
        Self::from_config(HullWhiteConfig {
            mean_reversion,
            volatility,
            num_time_steps,
        })
    }

    /// Creates a model from a validated configuration.
    pub fn from_config(config: HullWhiteConfig) -> BondResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn config(&self) -> &HullWhiteConfig {
        &self.config
    }

    /// Returns the mean reversion speed.
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.config.mean_reversion
    }

    /// Returns the short rate volatility.
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.config.volatility
    }
}

impl ShortRateTreeModel for HullWhiteTree {
    type Tree = TrinomialTree;

    fn build_tree(
        &self,
        time_to_maturity: f64,
        curve_times: &[f64],
        curve_dfs: &[f64],
    ) -> BondResult<TrinomialTree> {
        TrinomialTree::calibrate(
            self.config.mean_reversion,
            self.config.volatility,
            time_to_maturity,
            self.config.num_time_steps,
            curve_times,
            curve_dfs,
        )
    }

    fn bond_option(
        &self,
        tree: &TrinomialTree,
        time_to_expiry: f64,
        strike: f64,
        face: f64,
        coupon_times: &[f64],
        coupon_amounts: &[f64],
        exercise: ExerciseStyle,
    ) -> BondResult<CallPutValues> {
        if coupon_times.len() != coupon_amounts.len() {
            return Err(BondError::invalid_argument(format!(
                "coupon times and amounts differ in length: {} vs {}",
                coupon_times.len(),
                coupon_amounts.len()
            )));
        }
        if !(time_to_expiry.is_finite() && time_to_expiry >= 0.0) {
            return Err(BondError::invalid_argument(format!(
                "time to expiry must be non-negative, got {time_to_expiry}"
            )));
        }
        if time_to_expiry > tree.maturity() + 0.5 * tree.dt() {
            return Err(BondError::invalid_argument(format!(
                "option expiry {time_to_expiry} is after bond maturity {}",
                tree.maturity()
            )));
        }
        if !(face.is_finite() && face > 0.0) || !strike.is_finite() {
            return Err(BondError::invalid_argument(format!(
                "invalid face {face} or strike {strike}"
            )));
        }

        let num_steps = tree.num_steps();
        let expiry_step = nearest_step(time_to_expiry, tree.dt(), num_steps);

        let (tree_flows, accrual_start) = map_coupons(tree, coupon_times, coupon_amounts);
        let accrued = accrued_on_tree(tree, &tree_flows, accrual_start, face);

        let num_nodes = tree.num_nodes();
        let mut bond = vec![0.0; num_nodes];
        let mut call = vec![0.0; num_nodes];
        let mut put = vec![0.0; num_nodes];

        let reach = tree.reach(num_steps);
        for j in -reach..=reach {
            let i = tree.node_index(j);
            bond[i] = face * (1.0 + tree_flows[num_steps]);
            if expiry_step == num_steps {
                let clean = bond[i] - accrued[num_steps];
                call[i] = (clean - strike).max(0.0);
                put[i] = (strike - clean).max(0.0);
            }
        }

        let mut prev_bond = vec![0.0; num_nodes];
        let mut prev_call = vec![0.0; num_nodes];
        let mut prev_put = vec![0.0; num_nodes];

        for m in (0..num_steps).rev() {
            let reach = tree.reach(m);
            for j in -reach..=reach {
                let discount = tree.discount(m, j);
                let (mut b, mut c, mut p) = (0.0, 0.0, 0.0);
                for (k, prob) in tree.successors(j) {
                    let next = tree.node_index(k);
                    b += prob * bond[next];
                    c += prob * call[next];
                    p += prob * put[next];
                }

                let i = tree.node_index(j);
                prev_bond[i] = b * discount + face * tree_flows[m];
                let clean = prev_bond[i] - accrued[m];

                if m > expiry_step {
                    prev_call[i] = 0.0;
                    prev_put[i] = 0.0;
                } else if m == expiry_step {
                    prev_call[i] = (clean - strike).max(0.0);
                    prev_put[i] = (strike - clean).max(0.0);
                } else {
                    prev_call[i] = c * discount;
                    prev_put[i] = p * discount;
                    if exercise == ExerciseStyle::American {
                        prev_call[i] = prev_call[i].max(clean - strike);
                        prev_put[i] = prev_put[i].max(strike - clean);
                    }
                }
            }
            std::mem::swap(&mut bond, &mut prev_bond);
            std::mem::swap(&mut call, &mut prev_call);
            std::mem::swap(&mut put, &mut prev_put);
        }

        let root = tree.node_index(0);
        Ok(CallPutValues {
            call: call[root],
            put: put[root],
        })
    }

    fn name(&self) -> &'static str {
        "Hull-White"
    }
}

fn nearest_step(t: f64, dt: f64, num_steps: usize) -> usize {
    ((t / dt + 0.5).floor() as usize).min(num_steps)
}

/// Moves each coupon to its nearest lattice step, rescaling the amount so its
/// present value on the curve is unchanged.
///
/// Negative coupon times are not paid; the latest one becomes the start of
/// accrual for the first tree coupon. Without one, accrual starts at zero.
fn map_coupons(tree: &TrinomialTree, times: &[f64], amounts: &[f64]) -> (Vec<f64>, f64) {
    let num_steps = tree.num_steps();
    let mut flows = vec![0.0; num_steps + 1];
    let mut accrual_start: Option<f64> = None;

    for (&t, &amount) in times.iter().zip(amounts) {
        if t < 0.0 {
            accrual_start = Some(accrual_start.map_or(t, |s| s.max(t)));
            continue;
        }
        let step = nearest_step(t, tree.dt(), num_steps);
        let node_df = tree.curve_df(tree.time(step));
        flows[step] += amount * tree.curve_df(t) / node_df;
    }

    (flows, accrual_start.unwrap_or(0.0))
}

/// Accrued interest at each step, interpolated linearly in time between
/// mapped coupon steps.
///
/// A coupon step carries a full period of accrual so that dirty values, which
/// include the coupon paid at that step, net to ex-coupon clean values.
fn accrued_on_tree(tree: &TrinomialTree, flows: &[f64], accrual_start: f64, face: f64) -> Vec<f64> {
    let mut accrued = vec![0.0; flows.len()];
    let mut prev = accrual_start;
    let mut m = 0;

    for (step, amount) in flows.iter().enumerate().filter(|(_, a)| **a != 0.0) {
        let next = tree.time(step);
        while m <= step {
            let t = tree.time(m);
            if next > prev && t > prev {
                accrued[m] = (t - prev) / (next - prev) * amount * face;
            }
            m += 1;
        }
        prev = next;
    }
    accrued
}
