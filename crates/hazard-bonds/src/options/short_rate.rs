//! Short rate lattice model interface.

use serde::{Deserialize, Serialize};

use hazard_core::types::ExerciseStyle;

use crate::error::BondResult;

/// Call and put values of a bond option from a single lattice pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CallPutValues {
    /// Value of the call.
    pub call: f64,
    /// Value of the put.
    pub put: f64,
}

/// A short rate model that prices bond options on a calibrated lattice.
///
/// Pricing is two-phase: [`build_tree`](ShortRateTreeModel::build_tree)
/// calibrates a lattice to a discount curve out to the bond's maturity, and
/// [`bond_option`](ShortRateTreeModel::bond_option) values both sides of an
/// option on that lattice. The built tree is returned to the caller rather
/// than stored on the model, so a model can be shared across threads.
///
/// Times are in years from the valuation date. Coupon amounts are per unit
/// face; a coupon time may be negative when it marks the previous coupon date
/// of the period containing the valuation date.
pub trait ShortRateTreeModel {
    /// The calibrated lattice.
    type Tree;

    /// Calibrates a lattice to the discount curve nodes.
    fn build_tree(
        &self,
        time_to_maturity: f64,
        curve_times: &[f64],
        curve_dfs: &[f64],
    ) -> BondResult<Self::Tree>;

    /// Values a call and a put on a coupon bond struck on clean price.
    fn bond_option(
        &self,
        tree: &Self::Tree,
        time_to_expiry: f64,
        strike: f64,
        face: f64,
        coupon_times: &[f64],
        coupon_amounts: &[f64],
        exercise: ExerciseStyle,
    ) -> BondResult<CallPutValues>;

    /// Returns the model name.
    fn name(&self) -> &'static str;
}
