use quadsample_core::{prelude::*, ParamError, Parameters, Properties, Value};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{NumSpinReversalTransforms, CHILD_PROPERTIES};

/// Name of the parameter setting [`NumSpinReversalTransforms`].
pub const NUM_SPIN_REVERSAL_TRANSFORMS: &str = "num_spin_reversal_transforms";

/// Name of the parameter seeding random transforms.
pub const SEED: &str = "seed";

/// A composite sampling spin-reversal transforms of a model.
///
/// A spin-reversal transform flips a random subset of variables,
/// rewriting biases so energies are unchanged.
/// Each transform is sampled by the child,
/// samples are flipped back,
/// and results of every transform are concatenated,
/// in the vartype of the given model.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use quadsample_composites::SpinReversalTransformComposite;
/// use quadsample_core::prelude::*;
/// use quadsample_exact::ExactSolver;
///
/// let sampler = SpinReversalTransformComposite::new(Arc::new(ExactSolver::new()));
/// let set = sampler
///     .sample_ising(
///         &[(0, -1.0), (1, 1.0)],
///         &[],
///         Params::new()
///             .with("num_spin_reversal_transforms", 2)
///             .with("seed", 7),
///     )
///     .unwrap();
/// assert_eq!(set.len(), 2 * 4);
/// ```
#[derive(Debug)]
pub struct SpinReversalTransformComposite<V> {
    children: Vec<Child<V>>,
    properties: Properties,
    parameters: Parameters,
}

impl<V> SpinReversalTransformComposite<V>
where
    V: Variable,
{
    /// Return this composite wrapping `child`.
    pub fn new(child: Child<V>) -> Self {
        let properties = Properties::from([(
            CHILD_PROPERTIES.to_owned(),
            Value::Map(child.properties().clone()),
        )]);
        let mut parameters = child.parameters().clone();
        parameters.insert(NUM_SPIN_REVERSAL_TRANSFORMS.to_owned(), Vec::new());
        parameters.insert(SEED.to_owned(), Vec::new());
        Self {
            children: vec![child],
            properties,
            parameters,
        }
    }
}

impl<V> Composite<V> for SpinReversalTransformComposite<V>
where
    V: Variable,
{
    fn children(&self) -> &[Child<V>] {
        &self.children
    }
}

impl<V> Sampler<V> for SpinReversalTransformComposite<V>
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
        let mut params = params.retain_known(&self.parameters);
        let num_transforms = match params.take_usize(NUM_SPIN_REVERSAL_TRANSFORMS)? {
            Some(x) => NumSpinReversalTransforms::new(x).map_err(|_| ParamError {
                name: NUM_SPIN_REVERSAL_TRANSFORMS.to_owned(),
                expected: "a positive integer",
                found: x.into(),
            })?,
            None => NumSpinReversalTransforms::default(),
        };
        let mut rng = match params.take_u64(SEED)? {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let child = self.child()?;

        let spin = bqm.change_vartype(Vartype::Spin);
        let sets = (0..num_transforms.into_inner())
            .map(|_| {
                let flips = spin
                    .variables()
                    .filter(|_| rng.gen::<bool>())
                    .collect::<Vec<_>>();
                log::trace!(
                    "sampling transform flipping {} of {} variables",
                    flips.len(),
                    spin.num_variables()
                );
                let mut transformed = spin.clone();
                for v in &flips {
                    transformed.flip_variable(v)?;
                }
                Ok(child
                    .sample(&transformed, params.clone())?
                    .flip_variables(flips)?)
            })
            .collect::<Result<Vec<_>, SampleError>>()?;
        Ok(SampleSet::concatenate(sets)?.change_vartype(bqm.vartype()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use quadsample_exact::ExactSolver;
    use test_strategy::proptest;

    use super::*;

    fn exact() -> Child<usize> {
        Arc::new(ExactSolver::new())
    }

    fn ising() -> BinaryQuadraticModel<usize> {
        BinaryQuadraticModel::from_ising(
            [(0, -0.5), (1, 1.0), (2, 0.25)],
            [((0, 1), -1.5), ((1, 2), 0.5)],
            1.0,
        )
        .unwrap()
    }

    fn params(num_transforms: usize, seed: u64) -> Params {
        Params::new()
            .with(NUM_SPIN_REVERSAL_TRANSFORMS, num_transforms)
            .with(SEED, seed)
    }

    #[test]
    fn every_transform_contributes_every_assignment() {
        let set = SpinReversalTransformComposite::new(exact())
            .sample(&ising(), params(3, 0))
            .unwrap();
        assert_eq!(set.len(), 3 * 8);

        let aggregated = set.aggregate();
        assert_eq!(aggregated.len(), 8);
        assert!(aggregated.num_occurrences().iter().all(|x| *x == 3));
    }

    #[test]
    fn binary_models_are_returned_in_binary() {
        let bqm = ising().change_vartype(Vartype::Binary);
        let set = SpinReversalTransformComposite::new(exact())
            .sample(&bqm, params(2, 1))
            .unwrap();
        assert_eq!(set.vartype(), Vartype::Binary);
        for record in set.iter() {
            assert!((record.energy - bqm.energy(&record.sample.to_vec()).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let sampler = SpinReversalTransformComposite::new(exact());
        assert_eq!(
            sampler.sample(&ising(), params(4, 42)).unwrap(),
            sampler.sample(&ising(), params(4, 42)).unwrap()
        );
    }

    #[test]
    fn large_seeds_stay_distinct() {
        let bqm = BinaryQuadraticModel::from_ising(
            (0..6).map(|v| (v, 0.5)),
            (1..6).map(|v| ((v - 1, v), -1.0)),
            0.0,
        )
        .unwrap();
        let sampler = SpinReversalTransformComposite::new(exact());
        let sets = [u64::MAX, u64::MAX - 1, i64::MAX as u64]
            .map(|seed| sampler.sample(&bqm, params(8, seed)).unwrap());
        assert_ne!(sets[0], sets[1]);
        assert_ne!(sets[0], sets[2]);
        assert_ne!(sets[1], sets[2]);
        assert_eq!(sets[0], sampler.sample(&bqm, params(8, u64::MAX)).unwrap());
    }

    #[test]
    fn default_number_of_transforms_is_used_when_unset() {
        let set = SpinReversalTransformComposite::new(exact())
            .sample(&ising(), Params::new())
            .unwrap();
        assert_eq!(
            set.len(),
            NumSpinReversalTransforms::default().into_inner() * 8
        );
    }

    #[test]
    fn zero_transforms_are_rejected() {
        assert!(matches!(
            SpinReversalTransformComposite::new(exact()).sample(&ising(), params(0, 0)),
            Err(SampleError::Param(ParamError { found: Value::Int(0), .. }))
        ));
    }

    #[test]
    fn empty_models_return_empty_sample_sets() {
        let set = SpinReversalTransformComposite::new(exact())
            .sample(&BinaryQuadraticModel::new(Vartype::Binary), params(2, 0))
            .unwrap();
        assert!(set.is_empty());
        assert_eq!(set.vartype(), Vartype::Binary);
    }

    #[test]
    fn configuration_extends_the_child() {
        let child = exact();
        let sampler = SpinReversalTransformComposite::new(child.clone());
        assert!(Arc::ptr_eq(sampler.child().unwrap(), &child));
        assert_eq!(
            sampler.properties()[CHILD_PROPERTIES],
            Value::Map(Properties::new())
        );
        assert_eq!(
            sampler.parameters().keys().collect::<Vec<_>>(),
            [NUM_SPIN_REVERSAL_TRANSFORMS, SEED]
        );
    }

    #[proptest]
    fn transformed_samples_keep_model_energies(
        #[strategy(proptest::collection::vec(-10.0..10.0_f64, 1..=5))] linear: Vec<f64>,
        #[strategy(proptest::collection::vec(-10.0..10.0_f64, 4))] chain: Vec<f64>,
        seed: u64,
    ) {
        let bqm = BinaryQuadraticModel::from_ising(
            linear.iter().copied().enumerate(),
            (1..linear.len()).map(|v| ((v - 1, v), chain[v - 1])),
            0.0,
        )
        .unwrap();
        let set = SpinReversalTransformComposite::new(exact())
            .sample(&bqm, params(2, seed))
            .unwrap();
        prop_assert_eq!(set.len(), 2 << linear.len());
        for record in set.iter() {
            prop_assert!(
                (record.energy - bqm.energy(&record.sample.to_vec()).unwrap()).abs() < 1e-9
            );
        }
    }
}
