#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! Composable samplers for binary quadratic models.
//!
//! A sampler maps a binary quadratic model,
//! in spin or binary form,
//! to a set of samples with energies.
//! A composed sampler wraps child samplers,
//! transforming what goes in or what comes out,
//! and is itself a sampler.
//! The exact solver enumerates every assignment
//! and is the usual innermost child
//! when testing composites.
//!
//! # Examples
//!
//! Find ground states of a small Ising model:
//!
//! ```
//! use quadsample::prelude::*;
//!
//! let set = ExactSolver::new()
//!     .sample_ising(
//!         &[("a", -0.5), ("b", 1.0)],
//!         &[(("a", "b"), -1.5)],
//!         Params::new(),
//!     )
//!     .unwrap();
//! let ground = set.first().unwrap();
//! assert_eq!(ground.energy, -2.0);
//! assert_eq!(ground.sample.to_vec(), [-1, -1]);
//! ```
//!
//! Stack composites over the exact solver:
//!
//! ```
//! use std::sync::Arc;
//!
//! use quadsample::{composites::*, prelude::*};
//!
//! let sampler = TruncateComposite::new(
//!     Arc::new(SpinReversalTransformComposite::new(Arc::new(
//!         ExactSolver::new(),
//!     ))),
//!     TruncateConfig::new(TruncateLen::new(1).unwrap()),
//! );
//! let set = sampler
//!     .sample_qubo(&[((0, 0), -1.0), ((0, 1), 2.0), ((1, 1), -1.0)], Params::new())
//!     .unwrap();
//! assert_eq!(set.energies().to_vec(), [-1.0]);
//! ```
//!
//! For serialization of configuration,
//! enable the `serde` feature.

pub mod prelude;

pub use quadsample_composites as composites;
pub use quadsample_core::*;
pub use quadsample_exact::{enumerate, ExactSolver};
