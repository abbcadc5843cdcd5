use std::fmt::Debug;

use quadsample_model::{BinaryQuadraticModel, ModelError, SampleSet, Variable};

use crate::{composite::MissingChildError, ParamError, Parameters, Params, Properties};

/// Error returned by [`Sampler::sample`].
#[derive(Clone, Debug, thiserror::Error)]
pub enum SampleError {
    /// The model or a returned sample set was malformed.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// A composite had no child to delegate to.
    #[error(transparent)]
    MissingChild(#[from] MissingChildError),
    /// A parameter had an invalid value.
    #[error(transparent)]
    Param(#[from] ParamError),
    /// Every assignment of this many variables
    /// cannot be held in memory.
    #[error("cannot enumerate every assignment of {0} variables")]
    TooManyVariables(usize),
}

/// A component mapping binary quadratic models
/// to sample sets.
///
/// Samplers are shared between composites
/// and may serve concurrent calls,
/// so `sample` takes `&self`.
pub trait Sampler<V>: Debug + Send + Sync
where
    V: Variable,
{
    /// Return read-only metadata describing this sampler.
    fn properties(&self) -> &Properties;

    /// Return parameters `sample` accepts.
    fn parameters(&self) -> &Parameters;

    /// Return samples of `bqm`.
    fn sample(
        &self,
        bqm: &BinaryQuadraticModel<V>,
        params: Params,
    ) -> Result<SampleSet<V>, SampleError>;

    /// Return samples of the Ising model
    /// with linear biases `h`
    /// and interactions `j`.
    fn sample_ising(
        &self,
        h: &[(V, f64)],
        j: &[((V, V), f64)],
        params: Params,
    ) -> Result<SampleSet<V>, SampleError> {
        let bqm = BinaryQuadraticModel::from_ising(h.iter().cloned(), j.iter().cloned(), 0.0)?;
        self.sample(&bqm, params)
    }

    /// Return samples of the QUBO
    /// with upper-triangular matrix `q`.
    fn sample_qubo(&self, q: &[((V, V), f64)], params: Params) -> Result<SampleSet<V>, SampleError> {
        self.sample(&BinaryQuadraticModel::from_qubo(q.iter().cloned(), 0.0), params)
    }
}
