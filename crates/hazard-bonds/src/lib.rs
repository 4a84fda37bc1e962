//! # Hazard Bonds
//!
//! Fixed coupon bonds and bond options for the Hazard library.
//!
//! This crate provides:
//!
//! - **Bonds**: [`Bond`] coupon schedules, accrued interest and curve pricing
//! - **Options**: [`BondOption`] valued on a [`ShortRateTreeModel`] lattice,
//!   with a Hull-White trinomial tree implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use hazard_bonds::prelude::*;
//! use hazard_core::prelude::*;
//! use hazard_curves::DiscountCurve;
//! use rust_decimal_macros::dec;
//!
//! let value_date = Date::from_ymd(2021, 3, 1).unwrap();
//! let bond = Bond::new(
//!     Date::from_ymd(2020, 6, 1).unwrap(),
//!     Date::from_ymd(2027, 6, 1).unwrap(),
//!     dec!(0.05),
//!     Frequency::SemiAnnual,
//!     DayCountConvention::Thirty360US,
//! )
//! .unwrap();
//!
//! let curve = DiscountCurve::flat(value_date, 0.04).unwrap();
//! let model = HullWhiteTree::new(0.05, 0.01, 200).unwrap();
//!
//! let expiry = Date::from_ymd(2023, 6, 1).unwrap();
//! let call = BondOption::new(bond.clone(), expiry, 100.0, OptionType::AmericanCall).unwrap();
//! let put = BondOption::new(bond, expiry, 100.0, OptionType::AmericanPut).unwrap();
//!
//! assert!(call.value(value_date, &curve, &model).unwrap() > 0.0);
//! assert!(put.value(value_date, &curve, &model).unwrap() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod bond;
pub mod error;
pub mod options;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::Bond;
    pub use crate::error::{BondError, BondResult};
    pub use crate::options::{
        BondOption, CallPutValues, HullWhiteConfig, HullWhiteTree, ShortRateTreeModel,
        TrinomialTree,
    };
}

pub use bond::Bond;
pub use error::{BondError, BondResult};
pub use options::{BondOption, ShortRateTreeModel};
