#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! Binary quadratic models
//! and the sample sets samplers return for them.
//!
//! A [`BinaryQuadraticModel`] assigns an energy
//! to every assignment of its variables,
//! each variable taking one of the two values of its [`Vartype`].
//! A [`SampleSet`] is an ordered collection of assignments,
//! with their energies and occurrence counts.
//!
//! # Examples
//!
//! ```
//! use quadsample_model::*;
//!
//! let bqm = BinaryQuadraticModel::from_ising(
//!     [("a", -0.5), ("b", 1.0)],
//!     [(("a", "b"), -1.5)],
//!     0.0,
//! )
//! .unwrap();
//! assert_eq!(bqm.energy(&[-1, -1]).unwrap(), -2.0);
//! assert_eq!(bqm.energy(&[-1, 1]).unwrap(), 3.0);
//! ```

mod bqm;
mod sampleset;
mod vartype;

use std::{fmt::Debug, hash::Hash};

pub use self::{bqm::*, sampleset::*, vartype::*};

/// A type usable as a variable label.
pub trait Variable: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Variable for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Error returned when a model or sample set
/// is given inconsistent data.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ModelError {
    /// An interaction joins a variable to itself.
    #[error("interaction between `{0}` and itself")]
    SelfLoop(String),
    /// A variable is not part of the model or sample set.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    /// A variable appears more than once.
    #[error("variable `{0}` appears more than once")]
    DuplicateVariable(String),
    /// A sample does not have one value per variable.
    #[error("sample has {found} values, expected {expected}")]
    SampleLength {
        /// Number of variables.
        expected: usize,
        /// Number of values given.
        found: usize,
    },
    /// A value is outside the domain of its variable.
    #[error("{value} is not a {vartype} value")]
    InvalidValue {
        /// Offending value.
        value: i8,
        /// Domain of the variable.
        vartype: Vartype,
    },
    /// Energies do not have one value per sample.
    #[error("{found} energies given for {expected} samples")]
    EnergyCount {
        /// Number of samples.
        expected: usize,
        /// Number of energies given.
        found: usize,
    },
    /// Sample sets label their variables differently.
    #[error("sample sets have different variables")]
    VariableMismatch,
    /// Sample sets have different domains.
    #[error("expected {expected} samples, found {found} samples")]
    VartypeMismatch {
        /// Domain of the first sample set.
        expected: Vartype,
        /// Domain of the offending sample set.
        found: Vartype,
    },
    /// No sample sets were given to concatenate.
    #[error("nothing to concatenate")]
    NothingToConcatenate,
    /// Sample data could not be arranged into a matrix.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
