#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

//! A sampler returning every assignment of a binary quadratic model.
//!
//! [`ExactSolver`] evaluates the energy of all `2^n` assignments
//! of a model with `n` variables.
//! It is meant for testing and validating other samplers,
//! and becomes slow beyond roughly 18 variables.
//!
//! # Examples
//!
//! ```
//! use quadsample_core::prelude::*;
//! use quadsample_exact::ExactSolver;
//!
//! let set = ExactSolver::new()
//!     .sample_ising(
//!         &[("a", -0.5), ("b", 1.0)],
//!         &[(("a", "b"), -1.5)],
//!         Params::new(),
//!     )
//!     .unwrap();
//! println!("{set}");
//! assert_eq!(set.len(), 4);
//! assert_eq!(set.first().unwrap().energy, -2.0);
//! ```

use itertools::Itertools;
use ndarray::Array2;
use quadsample_core::{model::ModelError, prelude::*, Parameters, Properties};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sampler enumerating every assignment.
///
/// Returned samples are in [`enumerate`] order,
/// each occurring once.
/// This sampler has no properties
/// and accepts no parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExactSolver {
    properties: Properties,
    parameters: Parameters,
}

impl ExactSolver {
    /// Return a new exact solver.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> Sampler<V> for ExactSolver
where
    V: Variable,
{
    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn sample(
        &self,
        bqm: &BinaryQuadraticModel<V>,
        params: Params,
    ) -> Result<SampleSet<V>, SampleError> {
        params.warn_unknown(&self.parameters);
        if bqm.is_empty() {
            return Ok(SampleSet::empty(bqm.vartype()));
        }
        let samples = enumerate(bqm.vartype(), bqm.num_variables())?;
        Ok(SampleSet::from_samples_bqm(
            samples,
            bqm.variables().cloned().collect(),
            bqm,
        )?)
    }
}

/// Return every assignment of `len` variables of `vartype`,
/// one per row.
///
/// Rows are in lexicographic order of [`Vartype::values`],
/// the last variable changing fastest.
///
/// Fails with [`SampleError::TooManyVariables`]
/// when the `2^len` rows cannot be allocated.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use quadsample_core::prelude::*;
/// use quadsample_exact::enumerate;
///
/// assert_eq!(
///     enumerate(Vartype::Binary, 2).unwrap(),
///     array![[0, 0], [0, 1], [1, 0], [1, 1]]
/// );
/// ```
pub fn enumerate(vartype: Vartype, len: usize) -> Result<Array2<i8>, SampleError> {
    let (rows, size) = u32::try_from(len)
        .ok()
        .and_then(|len| 1_usize.checked_shl(len))
        .and_then(|rows| rows.checked_mul(len).map(|size| (rows, size)))
        .filter(|(_, size)| isize::try_from(*size).is_ok())
        .ok_or(SampleError::TooManyVariables(len))?;
    let mut values = Vec::new();
    values
        .try_reserve_exact(size)
        .map_err(|_| SampleError::TooManyVariables(len))?;
    log::debug!("enumerating {rows} assignments of {len} {vartype} variables");
    values.extend(
        std::iter::repeat(vartype.values())
            .take(len)
            .multi_cartesian_product()
            .flatten(),
    );
    Ok(Array2::from_shape_vec((rows, len), values).map_err(ModelError::from)?)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread::spawn};

    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    fn ising() -> BinaryQuadraticModel<&'static str> {
        BinaryQuadraticModel::from_ising([("a", -0.5), ("b", 1.0)], [(("a", "b"), -1.5)], 0.0)
            .unwrap()
    }

    #[test]
    fn exact_solver_returns_every_energy_of_a_small_ising_model() {
        let set = ExactSolver::new().sample(&ising(), Params::new()).unwrap();
        assert_eq!(set.vartype(), Vartype::Spin);
        assert_eq!(set.variables(), ["a", "b"]);
        assert_eq!(
            set.samples(),
            ndarray::array![[-1, -1], [-1, 1], [1, -1], [1, 1]]
        );
        assert_eq!(set.energies().to_vec(), [-2.0, 3.0, 0.0, -1.0]);
        assert_eq!(set.num_occurrences().to_vec(), [1, 1, 1, 1]);
    }

    #[test]
    fn exact_solver_returns_two_samples_for_one_variable() {
        let set = ExactSolver::new()
            .sample_qubo(&[(("x", "x"), 1.0)], Params::new())
            .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.energies().to_vec(), [0.0, 1.0]);
    }

    #[test]
    fn exact_solver_returns_nothing_for_empty_models() {
        for vartype in [Vartype::Spin, Vartype::Binary] {
            let mut bqm = BinaryQuadraticModel::<usize>::new(vartype);
            bqm.add_offset(1.0);
            let set = ExactSolver::new().sample(&bqm, Params::new()).unwrap();
            assert!(set.is_empty());
            assert_eq!(set.energies().len(), 0);
            assert_eq!(set.vartype(), vartype);
        }
    }

    #[test]
    fn exact_solver_ignores_unknown_parameters() {
        assert_eq!(
            ExactSolver::new()
                .sample(&ising(), Params::new().with("num_reads", 10))
                .unwrap(),
            ExactSolver::new().sample(&ising(), Params::new()).unwrap()
        );
    }

    #[test]
    fn exact_solver_has_no_configuration() {
        let solver = ExactSolver::new();
        assert!(Sampler::<usize>::properties(&solver).is_empty());
        assert!(Sampler::<usize>::parameters(&solver).is_empty());
    }

    #[test]
    fn enumerate_rejects_unrepresentable_sizes() {
        for len in [58, usize::BITS as usize, usize::MAX] {
            assert!(matches!(
                enumerate(Vartype::Spin, len),
                Err(SampleError::TooManyVariables(x)) if x == len
            ));
        }
    }

    #[test]
    fn exact_solver_serves_concurrent_calls() {
        let solver = Arc::new(ExactSolver::new());
        let handles = (0..4)
            .map(|_| {
                let solver = Arc::clone(&solver);
                spawn(move || solver.sample(&ising(), Params::new()).unwrap())
            })
            .collect::<Vec<_>>();
        let expected = solver.sample(&ising(), Params::new()).unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[proptest]
    fn exact_solver_returns_every_assignment_once_with_model_energies(
        #[strategy(arbitrary_bqm())] bqm: BinaryQuadraticModel<usize>,
    ) {
        let set = ExactSolver::new().sample(&bqm, Params::new()).unwrap();
        prop_assert_eq!(set.len(), 1 << bqm.num_variables());
        prop_assert_eq!(set.variables(), bqm.variables().copied().collect::<Vec<_>>());

        let distinct = set
            .samples()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect::<HashSet<_>>();
        prop_assert_eq!(distinct.len(), set.len());

        for record in set.iter() {
            prop_assert_eq!(
                record.energy,
                bqm.energy(&record.sample.to_vec()).unwrap()
            );
        }
    }

    #[proptest]
    fn exact_solver_is_deterministic(#[strategy(arbitrary_bqm())] bqm: BinaryQuadraticModel<usize>) {
        prop_assert_eq!(
            ExactSolver::new().sample(&bqm, Params::new()).unwrap(),
            ExactSolver::new().sample(&bqm, Params::new()).unwrap()
        );
    }

    fn arbitrary_bqm() -> impl Strategy<Value = BinaryQuadraticModel<usize>> {
        (
            prop_oneof![Just(Vartype::Spin), Just(Vartype::Binary)],
            proptest::collection::vec(-10.0..10.0_f64, 1..=8),
            proptest::collection::vec((0..8_usize, 0..8_usize, -10.0..10.0_f64), 0..16),
        )
            .prop_map(|(vartype, linear, quadratic)| {
                let len = linear.len();
                let mut bqm = BinaryQuadraticModel::new(vartype);
                for (v, bias) in linear.into_iter().enumerate() {
                    bqm.add_variable(v, bias);
                }
                for (u, v, bias) in quadratic {
                    let (u, v) = (u % len, v % len);
                    if u != v {
                        bqm.add_interaction(u, v, bias).unwrap();
                    }
                }
                bqm
            })
    }
}
