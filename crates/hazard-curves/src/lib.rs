//! # Hazard Curves
//!
//! Interest rate term structures for the Hazard credit analytics library.
//!
//! This crate provides:
//!
//! - **Term Structure Trait**: [`TermStructure`] exposes node arrays and
//!   flat-forward interpolated values
//! - **Discount Curve**: [`DiscountCurve`], an immutable flat-forward curve
//! - **Instruments**: deposits, FRAs and fixed-for-floating swaps used as
//!   calibration inputs, with the swap fixed leg cash flow generator
//! - **Ibor Curve**: [`IborCurve`], a sequential bootstrap of the
//!   instruments that can be rebuilt from a bumped parameter set
//!
//! ## Quick Start
//!
//! ```rust
//! use hazard_core::prelude::*;
//! use hazard_curves::prelude::*;
//!
//! let value_date = Date::from_ymd(2008, 12, 22).unwrap();
//! let deposit = IborDeposit::from_tenor(value_date, "3M", 0.0502, DayCountConvention::Act360).unwrap();
//! let swap = IborSwap::from_tenor(value_date, "5Y", SwapType::Pay, 0.0450, Frequency::SemiAnnual,
//!     DayCountConvention::Thirty360US).unwrap();
//!
//! let curve = IborCurve::build(value_date, vec![deposit], vec![], vec![swap]).unwrap();
//! assert!(curve.df(1.0) < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]

pub mod discount_curve;
pub mod error;
pub mod ibor_curve;
pub mod instruments;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discount_curve::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::ibor_curve::IborCurve;
    pub use crate::instruments::{IborDeposit, IborFra, IborSwap, SwapFixedLeg, SwapType};
    pub use crate::traits::TermStructure;
}

pub use discount_curve::DiscountCurve;
pub use error::{CurveError, CurveResult};
pub use ibor_curve::IborCurve;
pub use traits::TermStructure;
