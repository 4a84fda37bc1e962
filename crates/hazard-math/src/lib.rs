//! # Hazard Math
//!
//! Numerical building blocks for the Hazard credit analytics library.
//!
//! This crate provides:
//!
//! - **Interpolation**: flat-forward interpolation of discount factors and
//!   survival probabilities over plain node slices
//! - **Solvers**: bracketing root finders (Brent, Bisection) used by curve
//!   bootstrapping
//!
//! Everything here works on `f64` and primitive slices so the credit
//! integrators can call it in tight loops without allocating.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::flat_forward_interpolate;
    pub use crate::solvers::{bisection, brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
