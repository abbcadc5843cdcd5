use derive_builder::Builder;
use quadsample_core::{model::SortBy, prelude::*, Parameters, Properties, Value};

use crate::{TruncateLen, CHILD_PROPERTIES};

/// Configuration of [`TruncateComposite`].
#[derive(Clone, Debug, PartialEq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruncateConfig {
    /// See [`TruncateLen`].
    pub n: TruncateLen,
    /// Order of samples kept.
    #[builder(default)]
    pub sorted_by: SortBy,
    /// Whether to merge identical samples
    /// before truncating.
    #[builder(default)]
    pub aggregate: bool,
}

impl TruncateConfig {
    /// Return configuration keeping the `n` lowest-energy samples.
    pub fn new(n: TruncateLen) -> Self {
        Self {
            n,
            sorted_by: SortBy::default(),
            aggregate: false,
        }
    }
}

/// A composite keeping at most `n` samples
/// returned by its child.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use quadsample_composites::{TruncateComposite, TruncateConfigBuilder, TruncateLen};
/// use quadsample_core::prelude::*;
/// use quadsample_exact::ExactSolver;
///
/// let sampler = TruncateComposite::new(
///     Arc::new(ExactSolver::new()),
///     TruncateConfigBuilder::default()
///         .n(TruncateLen::new(1).unwrap())
///         .build()
///         .unwrap(),
/// );
/// let set = sampler
///     .sample_qubo(&[(("a", "a"), -1.0), (("a", "b"), 2.0)], Params::new())
///     .unwrap();
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.energies()[0], -1.0);
/// ```
#[derive(Debug)]
pub struct TruncateComposite<V> {
    children: Vec<Child<V>>,
    config: TruncateConfig,
    properties: Properties,
    parameters: Parameters,
}

impl<V> TruncateComposite<V>
where
    V: Variable,
{
    /// Return this composite wrapping `child`.
    pub fn new(child: Child<V>, config: TruncateConfig) -> Self {
        let properties = Properties::from([(
            CHILD_PROPERTIES.to_owned(),
            Value::Map(child.properties().clone()),
        )]);
        let parameters = child.parameters().clone();
        Self {
            children: vec![child],
            config,
            properties,
            parameters,
        }
    }

    /// Return configuration.
    pub fn config(&self) -> &TruncateConfig {
        &self.config
    }
}

impl<V> Composite<V> for TruncateComposite<V>
where
    V: Variable,
{
    fn children(&self) -> &[Child<V>] {
        &self.children
    }
}

impl<V> Sampler<V> for TruncateComposite<V>
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
        let set = self.child()?.sample(bqm, params)?;
        let set = if self.config.aggregate {
            set.aggregate()
        } else {
            set
        };
        log::debug!(
            "keeping {} of {} samples",
            set.len().min(self.config.n.into_inner()),
            set.len()
        );
        Ok(set.truncate(self.config.n.into_inner(), self.config.sorted_by))
    }
}
