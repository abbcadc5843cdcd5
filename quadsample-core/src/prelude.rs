//! Useful traits, types, and functions unlikely to conflict with existing definitions.

pub use quadsample_model::{BinaryQuadraticModel, SampleSet, Variable, Vartype};

pub use crate::{Child, ComposedSampler, Composite, Params, SampleError, Sampler};
