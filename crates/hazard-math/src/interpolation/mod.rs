//! Interpolation over curve nodes.
//!
//! Curves in Hazard are stored as structure-of-arrays: a slice of node
//! times and a slice of node values (discount factors or survival
//! probabilities). The kernels here interpolate directly on those slices.

mod flat_forward;

pub use flat_forward::{flat_forward_interpolate, validate_nodes};
