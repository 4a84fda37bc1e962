//! # Hazard Credit
//!
//! Single-name credit default swap analytics for the Hazard library.
//!
//! This crate provides:
//!
//! - **Schedules**: [`CdsSchedule`] premium leg dates, accrual factors and
//!   flows under standard CDS conventions
//! - **Integrators**: risky PV01 and protection leg kernels over plain node
//!   slices, with batch variants (parallel under the `parallel` feature)
//! - **Engine**: [`Cds`] valuation, par spread, accrued interest, fast
//!   closed-form approximation, and bump-and-rebuild sensitivities
//! - **Issuer Curve**: [`IssuerCurve`], survival probabilities bootstrapped
//!   from CDS quotes and bound to an Ibor discount curve
//!
//! ## Quick Start
//!
//! ```rust
//! use hazard_core::prelude::*;
//! use hazard_curves::prelude::*;
//! use hazard_credit::prelude::*;
//!
//! let value_date = Date::from_ymd(2009, 5, 1).unwrap();
//! let ibor = IborCurve::from_discount_curve(DiscountCurve::flat(value_date, 0.03).unwrap());
//! let config = CdsPricingConfig::default();
//!
//! let quotes = vec![
//!     Cds::standard(value_date, Tenor::years(3), 0.0120, true).unwrap(),
//!     Cds::standard(value_date, Tenor::years(5), 0.0150, true).unwrap(),
//! ];
//! let issuer = IssuerCurve::build(value_date, quotes, 0.40, ibor, config).unwrap();
//!
//! let trade = Cds::standard(value_date, Tenor::years(4), 0.0100, true).unwrap();
//! let value = trade.value(value_date, &issuer, 0.40, &config);
//! let spread = trade.par_spread(value_date, &issuer, 0.40, &config).unwrap();
//! assert!(value.dirty_pv > 0.0);
//! assert!(spread > 0.0120 && spread < 0.0150);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod cds;
pub mod config;
pub mod error;
pub mod integrators;
pub mod issuer_curve;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cds::{Cds, CdsMaturity, CdsValue, FastApproxValue};
    pub use crate::config::{CdsPricingConfig, IntegrationMethod};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::integrators::{
        protection_leg_pv, protection_leg_pv_batch, risky_pv01, risky_pv01_batch, CurveNodes,
        ProtectionLegInputs, RiskyAnnuityInputs, RiskyPv01,
    };
    pub use crate::issuer_curve::IssuerCurve;
    pub use crate::schedule::{CdsConventions, CdsSchedule};
}

pub use cds::{Cds, CdsMaturity, CdsValue, FastApproxValue};
pub use config::{CdsPricingConfig, IntegrationMethod};
pub use error::{CreditError, CreditResult};
pub use issuer_curve::IssuerCurve;
pub use schedule::{CdsConventions, CdsSchedule};
