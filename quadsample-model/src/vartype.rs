//! Variable domains.

use std::str::FromStr;

use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a [`Vartype`].
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("`{0}` is not a vartype, expected `SPIN` or `BINARY`")]
pub struct ParseVartypeError(pub String);

/// The two-valued domain every variable of a model takes.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Vartype {
    /// Variables take values in `{-1, +1}`.
    #[display(fmt = "SPIN")]
    Spin,
    /// Variables take values in `{0, 1}`.
    #[display(fmt = "BINARY")]
    Binary,
}

impl Vartype {
    /// Return the two admissible values,
    /// in the order samplers enumerate them.
    pub const fn values(self) -> [i8; 2] {
        match self {
            Self::Spin => [-1, 1],
            Self::Binary => [0, 1],
        }
    }

    /// Return whether `value` belongs to this domain.
    pub fn contains(self, value: i8) -> bool {
        self.values().contains(&value)
    }

    /// Return the value of `to`
    /// corresponding to `value` of this domain.
    ///
    /// `value` must belong to this domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadsample_model::Vartype;
    ///
    /// assert_eq!(Vartype::Spin.convert(-1, Vartype::Binary), 0);
    /// assert_eq!(Vartype::Binary.convert(1, Vartype::Spin), 1);
    /// assert_eq!(Vartype::Binary.convert(0, Vartype::Binary), 0);
    /// ```
    pub fn convert(self, value: i8, to: Vartype) -> i8 {
        match (self, to) {
            (Self::Spin, Self::Binary) => (value + 1) / 2,
            (Self::Binary, Self::Spin) => 2 * value - 1,
            _ => value,
        }
    }

    /// Return the other value of this domain.
    pub fn flip(self, value: i8) -> i8 {
        match self {
            Self::Spin => -value,
            Self::Binary => 1 - value,
        }
    }
}

impl FromStr for Vartype {
    type Err = ParseVartypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("spin") {
            Ok(Self::Spin)
        } else if s.eq_ignore_ascii_case("binary") {
            Ok(Self::Binary)
        } else {
            Err(ParseVartypeError(s.to_owned()))
        }
    }
}
