//! Bond option pricing on short rate lattices.
//!
//! This module provides:
//!
//! - **Short Rate Models**: the [`ShortRateTreeModel`] interface and the
//!   Hull-White trinomial tree
//! - **Trinomial Tree**: a recombining lattice fitted to a discount curve
//!   with Arrow-Debreu prices
//! - **Bond Options**: [`BondOption`], which turns a bond's coupon schedule
//!   into lattice inputs and selects the call or put value

pub mod bond_option;
pub mod models;
pub mod short_rate;
pub mod trinomial_tree;

pub use bond_option::BondOption;
pub use models::{HullWhiteConfig, HullWhiteTree};
pub use short_rate::{CallPutValues, ShortRateTreeModel};
pub use trinomial_tree::TrinomialTree;
