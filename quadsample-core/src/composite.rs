use std::sync::Arc;

use quadsample_model::Variable;

use crate::Sampler;

/// A shared handle to a child sampler.
///
/// One sampler may be a child of many composites.
pub type Child<V> = Arc<dyn Sampler<V>>;

/// Error returned when a composite has no children.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq)]
#[error("a composite must have at least one child sampler")]
pub struct MissingChildError;

/// A component wrapping child samplers
/// it delegates to.
pub trait Composite<V>
where
    V: Variable,
{
    /// Return child samplers,
    /// in order.
    fn children(&self) -> &[Child<V>];

    /// Return the first child sampler.
    ///
    /// A composite without children is representable
    /// but invalid for anything that delegates.
    fn child(&self) -> Result<&Child<V>, MissingChildError> {
        self.children().first().ok_or(MissingChildError)
    }
}

/// A sampler that is also a composite,
/// applying pre- and post-processing around its children.
///
/// Implemented for every type
/// implementing both [`Sampler`] and [`Composite`].
pub trait ComposedSampler<V>: Sampler<V> + Composite<V>
where
    V: Variable,
{
}

impl<V, T> ComposedSampler<V> for T
where
    V: Variable,
    T: Sampler<V> + Composite<V> + ?Sized,
{
}
