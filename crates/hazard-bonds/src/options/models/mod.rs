//! Short rate models implementing [`ShortRateTreeModel`](super::ShortRateTreeModel).

mod hull_white;

pub use hull_white::{
    HullWhiteConfig, HullWhiteTree, DEFAULT_MEAN_REVERSION, DEFAULT_NUM_TIME_STEPS,
    DEFAULT_VOLATILITY,
};
