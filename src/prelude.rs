//! Useful traits, types, and functions unlikely to conflict with existing definitions.

pub use quadsample_core::prelude::*;
pub use quadsample_exact::ExactSolver;
