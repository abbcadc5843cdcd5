//! Configuration surface of samplers.

use std::{collections::BTreeMap, fmt};

use derive_more::From;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only sampler metadata,
/// by name.
pub type Properties = BTreeMap<String, Value>;

/// Parameters a sampler accepts,
/// each with the names of properties relevant to it.
pub type Parameters = BTreeMap<String, Vec<String>>;

/// A dynamically typed configuration value.
#[derive(Clone, Debug, PartialEq, From)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A non-negative integer
    /// too large for [`Value::Int`].
    #[from(ignore)]
    UInt(u64),
    /// A real number.
    Float(f64),
    /// A string.
    Str(String),
    /// A list of values.
    List(Vec<Value>),
    /// Values by name.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Return this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(x) => Some(*x),
            _ => None,
        }
    }

    /// Return this value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(x) => Some(*x),
            Self::UInt(x) => i64::try_from(*x).ok(),
            _ => None,
        }
    }

    /// Return this value as a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(x) => u64::try_from(*x).ok(),
            Self::UInt(x) => Some(*x),
            _ => None,
        }
    }

    /// Return this value as a real number,
    /// converting integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Int(x) => Some(*x as f64),
            Self::UInt(x) => Some(*x as f64),
            _ => None,
        }
    }

    /// Return this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(x) => Some(x),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(x) => write!(f, "{x}"),
            Self::Int(x) => write!(f, "{x}"),
            Self::UInt(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(x) => write!(f, "{x:?}"),
            Self::List(xs) => {
                write!(f, "[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
            Self::Map(xs) => {
                write!(f, "{{")?;
                for (i, (k, x)) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {x}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Error returned when a parameter has the wrong type.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[error("parameter `{name}` expected {expected}, found {found}")]
pub struct ParamError {
    /// Name of the parameter.
    pub name: String,
    /// Description of the accepted values.
    pub expected: &'static str,
    /// Value given.
    pub found: Value,
}

/// Configuration of one `sample` call,
/// by parameter name.
///
/// # Examples
///
/// ```
/// use quadsample_core::{Params, Value};
///
/// let mut params = Params::new().with("seed", 42).with("label", "run");
/// assert_eq!(params.take_u64("seed").unwrap(), Some(42));
/// assert_eq!(params.get("label"), Some(&Value::from("run")));
/// assert!(!params.contains("seed"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Return parameters without values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these parameters
    /// with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`,
    /// returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Return the value of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove and return the value of `name`.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Return whether `name` has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Return number of parameters with values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether no parameter has a value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return names with values,
    /// in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Remove and return the value of `name`
    /// as a non-negative integer.
    pub fn take_u64(&mut self, name: &str) -> Result<Option<u64>, ParamError> {
        self.take_with(name, "a non-negative integer", Value::as_u64)
    }

    /// Remove and return the value of `name`
    /// as a size.
    pub fn take_usize(&mut self, name: &str) -> Result<Option<usize>, ParamError> {
        self.take_with(name, "a size", |x| {
            x.as_u64().and_then(|x| usize::try_from(x).ok())
        })
    }

    /// Remove and return the value of `name`
    /// as a boolean.
    pub fn take_bool(&mut self, name: &str) -> Result<Option<bool>, ParamError> {
        self.take_with(name, "a boolean", Value::as_bool)
    }

    fn take_with<T, F>(
        &mut self,
        name: &str,
        expected: &'static str,
        f: F,
    ) -> Result<Option<T>, ParamError>
    where
        F: Fn(&Value) -> Option<T>,
    {
        self.remove(name)
            .map(|value| {
                f(&value).ok_or_else(|| ParamError {
                    name: name.to_owned(),
                    expected,
                    found: value,
                })
            })
            .transpose()
    }

    /// Log a warning for each name absent from `parameters`.
    pub fn warn_unknown(&self, parameters: &Parameters) {
        for name in self.0.keys().filter(|name| !parameters.contains_key(*name)) {
            log::warn!("ignoring unknown parameter `{name}`");
        }
    }

    /// Return these parameters
    /// without names absent from `parameters`.
    ///
    /// Each dropped name is logged as a warning.
    pub fn retain_known(mut self, parameters: &Parameters) -> Self {
        self.warn_unknown(parameters);
        self.0.retain(|name, _| parameters.contains_key(name));
        self
    }
}

impl<K, T> FromIterator<(K, T)> for Params
where
    K: Into<String>,
    T: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
