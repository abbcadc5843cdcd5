#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! Capabilities for composing samplers.
//!
//! A [`Sampler`] maps a binary quadratic model
//! to a sample set.
//! A [`Composite`] wraps child samplers.
//! A [`ComposedSampler`] is both,
//! layering pre- and post-processing
//! over samplers it delegates to,
//! with a chain of delegation as follows:
//! `composite -> ... -> composite -> sampler`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use quadsample_core::{prelude::*, Parameters, Properties};
//!
//! /// Negates every bias,
//! /// so the child maximizes instead of minimizing.
//! #[derive(Debug)]
//! struct Negate<V> {
//!     children: Vec<Child<V>>,
//!     properties: Properties,
//!     parameters: Parameters,
//! }
//!
//! impl<V: Variable> Composite<V> for Negate<V> {
//!     fn children(&self) -> &[Child<V>] {
//!         &self.children
//!     }
//! }
//!
//! impl<V: Variable> Sampler<V> for Negate<V> {
//!     fn properties(&self) -> &Properties {
//!         &self.properties
//!     }
//!
//!     fn parameters(&self) -> &Parameters {
//!         &self.parameters
//!     }
//!
//!     fn sample(
//!         &self,
//!         bqm: &BinaryQuadraticModel<V>,
//!         params: Params,
//!     ) -> Result<SampleSet<V>, SampleError> {
//!         let mut negated = BinaryQuadraticModel::new(bqm.vartype());
//!         for (v, bias) in bqm.iter_linear() {
//!             negated.add_variable(v.clone(), -bias);
//!         }
//!         for (u, v, bias) in bqm.iter_quadratic() {
//!             negated.add_interaction(u.clone(), v.clone(), -bias)?;
//!         }
//!         negated.add_offset(-bqm.offset());
//!         let set = self.child()?.sample(&negated, params)?;
//!         Ok(SampleSet::from_samples_bqm(
//!             set.samples().to_owned(),
//!             set.variables().to_vec(),
//!             bqm,
//!         )?)
//!     }
//! }
//!
//! fn children_of<V: Variable>(sampler: &dyn ComposedSampler<V>) -> usize {
//!     sampler.children().len()
//! }
//!
//! let composite = Negate::<&str> {
//!     children: Vec::new(),
//!     properties: Properties::new(),
//!     parameters: Parameters::new(),
//! };
//! assert_eq!(children_of(&composite), 0);
//! assert!(composite.child().is_err());
//! ```

mod composite;
pub mod prelude;
mod sampler;
mod value;

pub use quadsample_model as model;

pub use self::{composite::*, sampler::*, value::*};
