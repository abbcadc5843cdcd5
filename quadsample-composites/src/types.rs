//! Configuration types for composites.

use derive_more::{Display, Into};
use num_traits::bounds::LowerBounded;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! lower_bounded_usize {
    ( $type:ident ) => {
        paste::paste! {
            #[doc = "Error returned when '" $type "' is given a value below lower bound."]
            #[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq)]
            #[error("{0} is below lower bound ({})", $type::min_value())]
            pub struct [<Invalid $type Error>](pub usize);

            #[doc = "Error returned when failing to parse '" $type "'."]
            #[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
            pub enum [<$type FromStrError>] {
                /// String is not an integer.
                #[error("failed to convert from 'str': {0}")]
                FromStr(#[from] std::num::ParseIntError),
                /// Integer is out of bounds.
                #[error("failed to convert into type: {0}")]
                TryInto(#[from] [<Invalid $type Error>]),
            }

            impl $type {
                #[doc = "Return a new '" $type "' if given a valid value."]
                pub fn new(value: usize) -> Result<Self, [<Invalid $type Error>]> {
                    if value < Self::min_value().0 {
                        Err([<Invalid $type Error>](value))
                    } else {
                        Ok(Self(value))
                    }
                }

                #[doc = "Unwrap '" $type "' into inner value."]
                pub fn into_inner(self) -> usize {
                    self.0
                }
            }

            impl TryFrom<usize> for $type {
                type Error = [<Invalid $type Error>];

                fn try_from(value: usize) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl std::str::FromStr for $type {
                type Err = [<$type FromStrError>];

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self::new(s.parse()?)?)
                }
            }
        }
    };
}

/// Number of spin-reversal transforms
/// sampled by [`crate::SpinReversalTransformComposite`],
/// each a call to the child sampler.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "usize"))]
#[cfg_attr(feature = "serde", serde(try_from = "usize"))]
pub struct NumSpinReversalTransforms(usize);

impl Default for NumSpinReversalTransforms {
    fn default() -> Self {
        Self(2)
    }
}

impl LowerBounded for NumSpinReversalTransforms {
    fn min_value() -> Self {
        Self(1)
    }
}

lower_bounded_usize!(NumSpinReversalTransforms);

/// Maximum number of samples
/// returned by [`crate::TruncateComposite`].
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "usize"))]
#[cfg_attr(feature = "serde", serde(try_from = "usize"))]
pub struct TruncateLen(usize);

impl LowerBounded for TruncateLen {
    fn min_value() -> Self {
        Self(1)
    }
}

lower_bounded_usize!(TruncateLen);
