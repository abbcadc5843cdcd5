#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! Composed samplers.
//!
//! Each composite wraps one child sampler,
//! transforming the model before delegating
//! or the sample set after.
//! Composites are samplers themselves,
//! so they stack.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use quadsample_composites::{
//!     SpinReversalTransformComposite, TruncateComposite, TruncateConfig, TruncateLen,
//! };
//! use quadsample_core::prelude::*;
//! use quadsample_exact::ExactSolver;
//!
//! let sampler = TruncateComposite::new(
//!     Arc::new(SpinReversalTransformComposite::new(Arc::new(
//!         ExactSolver::new(),
//!     ))),
//!     TruncateConfig {
//!         aggregate: true,
//!         ..TruncateConfig::new(TruncateLen::new(2).unwrap())
//!     },
//! );
//! let set = sampler
//!     .sample_ising(
//!         &[("a", -0.5), ("b", 1.0)],
//!         &[(("a", "b"), -1.5)],
//!         Params::new().with("seed", 0),
//!     )
//!     .unwrap();
//! assert_eq!(set.energies().to_vec(), [-2.0, -1.0]);
//! ```

mod spin_reversal;
mod truncate;
mod types;

pub use self::{spin_reversal::*, truncate::*, types::*};

/// Name of the property holding properties of the child sampler.
pub const CHILD_PROPERTIES: &str = "child_properties";
