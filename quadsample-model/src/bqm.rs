use indexmap::IndexMap;
use ndarray::{Array1, ArrayView2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ModelError, Variable, Vartype};

/// A quadratic objective over two-valued variables.
///
/// Energy of a sample `x` is
/// `offset + sum(linear[i] * x[i]) + sum(quadratic[(i, j)] * x[i] * x[j])`.
///
/// Variables keep insertion order.
/// Samples passed to [`BinaryQuadraticModel::energy`]
/// are aligned with that order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: Variable + Serialize",
        deserialize = "V: Variable + Deserialize<'de>"
    ))
)]
pub struct BinaryQuadraticModel<V> {
    linear: IndexMap<V, f64>,
    // Keyed by variable indices,
    // smaller index first.
    quadratic: IndexMap<(usize, usize), f64>,
    offset: f64,
    vartype: Vartype,
}

impl<V> BinaryQuadraticModel<V>
where
    V: Variable,
{
    /// Return a model without variables.
    pub fn new(vartype: Vartype) -> Self {
        Self {
            linear: IndexMap::new(),
            quadratic: IndexMap::new(),
            offset: 0.0,
            vartype,
        }
    }

    /// Return a spin-valued model
    /// from linear biases `h`
    /// and interactions `j`.
    pub fn from_ising<H, J>(h: H, j: J, offset: f64) -> Result<Self, ModelError>
    where
        H: IntoIterator<Item = (V, f64)>,
        J: IntoIterator<Item = ((V, V), f64)>,
    {
        let mut bqm = Self::new(Vartype::Spin);
        for (v, bias) in h {
            bqm.add_variable(v, bias);
        }
        for ((u, v), bias) in j {
            bqm.add_interaction(u, v, bias)?;
        }
        bqm.add_offset(offset);
        Ok(bqm)
    }

    /// Return a binary-valued model
    /// from an upper-triangular QUBO matrix `q`.
    ///
    /// Diagonal entries become linear biases.
    pub fn from_qubo<Q>(q: Q, offset: f64) -> Self
    where
        Q: IntoIterator<Item = ((V, V), f64)>,
    {
        let mut bqm = Self::new(Vartype::Binary);
        for ((u, v), bias) in q {
            if u == v {
                bqm.add_variable(u, bias);
            } else {
                let i = bqm.add_variable(u, 0.0);
                let j = bqm.add_variable(v, 0.0);
                bqm.add_interaction_at(i, j, bias);
            }
        }
        bqm.add_offset(offset);
        bqm
    }

    /// Add `bias` to the linear bias of `v`,
    /// adding `v` if necessary,
    /// and return its index.
    pub fn add_variable(&mut self, v: V, bias: f64) -> usize {
        let entry = self.linear.entry(v);
        let index = entry.index();
        *entry.or_insert(0.0) += bias;
        index
    }

    /// Add `bias` to the interaction between `u` and `v`,
    /// adding either if necessary.
    pub fn add_interaction(&mut self, u: V, v: V, bias: f64) -> Result<(), ModelError> {
        if u == v {
            return Err(ModelError::SelfLoop(format!("{u:?}")));
        }
        let i = self.add_variable(u, 0.0);
        let j = self.add_variable(v, 0.0);
        self.add_interaction_at(i, j, bias);
        Ok(())
    }

    fn add_interaction_at(&mut self, i: usize, j: usize, bias: f64) {
        *self.quadratic.entry((i.min(j), i.max(j))).or_insert(0.0) += bias;
    }

    /// Add `offset` to the constant energy term.
    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    /// Return number of variables.
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Return number of interactions.
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Return whether this model has no variables.
    pub fn is_empty(&self) -> bool {
        self.linear.is_empty()
    }

    /// Return variables in order.
    pub fn variables(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.linear.keys()
    }

    /// Return the variable at `index`.
    pub fn variable(&self, index: usize) -> Option<&V> {
        self.linear.get_index(index).map(|(v, _)| v)
    }

    /// Return the index of `v`.
    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.linear.get_index_of(v)
    }

    /// Return the linear bias of `v`.
    pub fn linear(&self, v: &V) -> Option<f64> {
        self.linear.get(v).copied()
    }

    /// Return the interaction between `u` and `v`.
    pub fn quadratic(&self, u: &V, v: &V) -> Option<f64> {
        let i = self.index_of(u)?;
        let j = self.index_of(v)?;
        self.quadratic.get(&(i.min(j), i.max(j))).copied()
    }

    /// Return variables with their linear biases.
    pub fn iter_linear(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.linear.iter().map(|(v, bias)| (v, *bias))
    }

    /// Return interacting pairs with their biases.
    pub fn iter_quadratic(&self) -> impl Iterator<Item = (&V, &V, f64)> + '_ {
        self.quadratic
            .iter()
            .filter_map(|(&(i, j), bias)| Some((self.variable(i)?, self.variable(j)?, *bias)))
    }

    /// Return the constant energy term.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Return the domain of every variable.
    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    /// Return the energy of `sample`,
    /// one value per variable,
    /// in variable order.
    pub fn energy(&self, sample: &[i8]) -> Result<f64, ModelError> {
        if sample.len() != self.num_variables() {
            return Err(ModelError::SampleLength {
                expected: self.num_variables(),
                found: sample.len(),
            });
        }
        if let Some(&value) = sample.iter().find(|x| !self.vartype.contains(**x)) {
            return Err(ModelError::InvalidValue {
                value,
                vartype: self.vartype,
            });
        }
        let linear = self
            .linear
            .values()
            .zip(sample)
            .map(|(bias, x)| bias * f64::from(*x))
            .sum::<f64>();
        let quadratic = self
            .quadratic
            .iter()
            .map(|(&(i, j), bias)| bias * f64::from(sample[i]) * f64::from(sample[j]))
            .sum::<f64>();
        Ok(self.offset + linear + quadratic)
    }

    /// Return the energy of each row of `samples`.
    pub fn energies(&self, samples: ArrayView2<i8>) -> Result<Array1<f64>, ModelError> {
        samples
            .rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(sample) => self.energy(sample),
                None => self.energy(&row.to_vec()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from)
    }

    /// Return the equivalent model over `vartype`.
    ///
    /// Energies are preserved
    /// for samples converted with [`Vartype::convert`].
    pub fn change_vartype(&self, vartype: Vartype) -> Self {
        if vartype == self.vartype {
            return self.clone();
        }

        let mut linear = self.linear.clone();
        let mut quadratic = IndexMap::with_capacity(self.quadratic.len());
        let mut offset = self.offset;
        match vartype {
            // x = (s + 1) / 2
            Vartype::Spin => {
                for bias in linear.values_mut() {
                    *bias /= 2.0;
                    offset += *bias;
                }
                for (&(i, j), &bias) in &self.quadratic {
                    let bias = bias / 4.0;
                    quadratic.insert((i, j), bias);
                    linear[i] += bias;
                    linear[j] += bias;
                    offset += bias;
                }
            }
            // s = 2x - 1
            Vartype::Binary => {
                for bias in linear.values_mut() {
                    offset -= *bias;
                    *bias *= 2.0;
                }
                for (&(i, j), &bias) in &self.quadratic {
                    quadratic.insert((i, j), 4.0 * bias);
                    linear[i] -= 2.0 * bias;
                    linear[j] -= 2.0 * bias;
                    offset += bias;
                }
            }
        }

        Self {
            linear,
            quadratic,
            offset,
            vartype,
        }
    }

    /// Rewrite this model
    /// so every sample with `v` flipped
    /// has the energy the unflipped sample had before.
    pub fn flip_variable(&mut self, v: &V) -> Result<(), ModelError> {
        let index = self
            .index_of(v)
            .ok_or_else(|| ModelError::UnknownVariable(format!("{v:?}")))?;
        if let Some((_, bias)) = self.linear.get_index_mut(index) {
            if self.vartype == Vartype::Binary {
                self.offset += *bias;
            }
            *bias = -*bias;
        }
        for (&(i, j), bias) in self.quadratic.iter_mut() {
            if i != index && j != index {
                continue;
            }
            if self.vartype == Vartype::Binary {
                let other = if i == index { j } else { i };
                self.linear[other] += *bias;
            }
            *bias = -*bias;
        }
        Ok(())
    }
}

/// Models are equal
/// when they have the same biases, offset, and vartype,
/// regardless of variable order.
impl<V> PartialEq for BinaryQuadraticModel<V>
where
    V: Variable,
{
    fn eq(&self, other: &Self) -> bool {
        self.vartype == other.vartype
            && self.offset == other.offset
            && self.linear == other.linear
            && self.num_interactions() == other.num_interactions()
            && self
                .iter_quadratic()
                .all(|(u, v, bias)| other.quadratic(u, v) == Some(bias))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn from_ising_rejects_self_loops() {
        assert!(matches!(
            BinaryQuadraticModel::from_ising([("a", 1.0)], [(("a", "a"), 1.0)], 0.0),
            Err(ModelError::SelfLoop(_))
        ));
    }

    #[test]
    fn from_qubo_moves_diagonal_to_linear() {
        let bqm = BinaryQuadraticModel::from_qubo(
            [(("a", "b"), 2.0), (("a", "a"), 1.0), (("b", "b"), -0.5)],
            0.0,
        );
        assert_eq!(bqm.vartype(), Vartype::Binary);
        assert_eq!(bqm.num_variables(), 2);
        assert_eq!(bqm.num_interactions(), 1);
        assert_eq!(bqm.linear(&"a"), Some(1.0));
        assert_eq!(bqm.linear(&"b"), Some(-0.5));
        assert_eq!(bqm.quadratic(&"b", &"a"), Some(2.0));
        assert_eq!(bqm.energy(&[1, 1]).unwrap(), 2.5);
    }

    #[test]
    fn interactions_accumulate_regardless_of_order() {
        let mut bqm = BinaryQuadraticModel::new(Vartype::Spin);
        bqm.add_interaction("a", "b", 1.0).unwrap();
        bqm.add_interaction("b", "a", 0.5).unwrap();
        assert_eq!(bqm.num_interactions(), 1);
        assert_eq!(bqm.quadratic(&"a", &"b"), Some(1.5));
        assert_eq!(
            bqm.iter_quadratic().collect::<Vec<_>>(),
            [(&"a", &"b", 1.5)]
        );
    }

    #[test]
    fn variables_keep_insertion_order() {
        let mut bqm = BinaryQuadraticModel::new(Vartype::Binary);
        bqm.add_variable("c", 1.0);
        bqm.add_interaction("a", "c", 1.0).unwrap();
        bqm.add_variable("b", 1.0);
        assert_eq!(bqm.variables().collect::<Vec<_>>(), [&"c", &"a", &"b"]);
        assert_eq!(bqm.index_of(&"b"), Some(2));
        assert_eq!(bqm.variable(1), Some(&"a"));
    }

    #[test]
    fn models_compare_by_biases_not_insertion_order() {
        let bqm = BinaryQuadraticModel::from_ising(
            [("a", 1.0), ("b", -1.0), ("c", 0.5)],
            [(("a", "b"), 2.0), (("b", "c"), -0.5)],
            1.0,
        )
        .unwrap();
        let reordered = BinaryQuadraticModel::from_ising(
            [("c", 0.5), ("b", -1.0), ("a", 1.0)],
            [(("c", "b"), -0.5), (("b", "a"), 2.0)],
            1.0,
        )
        .unwrap();
        assert_eq!(bqm, reordered);
        assert_eq!(bqm, bqm.clone());

        let mut changed = reordered.clone();
        changed.add_interaction("a", "c", 1.0).unwrap();
        assert_ne!(bqm, changed);
        assert_ne!(bqm, bqm.change_vartype(Vartype::Binary));
    }

    #[test]
    fn energy_rejects_malformed_samples() {
        let bqm = BinaryQuadraticModel::from_ising([("a", 1.0), ("b", 1.0)], [], 0.0).unwrap();
        assert!(matches!(
            bqm.energy(&[1]),
            Err(ModelError::SampleLength {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            bqm.energy(&[1, 0]),
            Err(ModelError::InvalidValue {
                value: 0,
                vartype: Vartype::Spin
            })
        ));
    }

    #[test]
    fn energy_of_empty_model_is_offset() {
        let mut bqm = BinaryQuadraticModel::<&str>::new(Vartype::Spin);
        bqm.add_offset(1.5);
        assert_eq!(bqm.energy(&[]).unwrap(), 1.5);
    }

    #[test]
    fn flip_variable_rejects_unknown_variables() {
        let mut bqm = BinaryQuadraticModel::from_ising([("a", 1.0)], [], 0.0).unwrap();
        assert!(matches!(
            bqm.flip_variable(&"b"),
            Err(ModelError::UnknownVariable(_))
        ));
    }

    #[proptest]
    fn changing_vartype_preserves_energies(
        #[strategy(arbitrary_bqm())] bqm: BinaryQuadraticModel<usize>,
        #[strategy(proptest::collection::vec(any::<bool>(), 6))] bits: Vec<bool>,
    ) {
        let sample = sample_from(&bqm, &bits);
        let other = match bqm.vartype() {
            Vartype::Spin => Vartype::Binary,
            Vartype::Binary => Vartype::Spin,
        };
        let converted = sample
            .iter()
            .map(|x| bqm.vartype().convert(*x, other))
            .collect::<Vec<_>>();
        prop_assert!(
            (bqm.energy(&sample).unwrap()
                - bqm.change_vartype(other).energy(&converted).unwrap())
            .abs()
                < 1e-9
        );
    }

    #[proptest]
    fn flipping_a_variable_preserves_energies_of_flipped_samples(
        #[strategy(arbitrary_bqm())] bqm: BinaryQuadraticModel<usize>,
        #[strategy(proptest::collection::vec(any::<bool>(), 6))] bits: Vec<bool>,
        #[strategy(0..6_usize)] flip: usize,
    ) {
        let flip = flip % bqm.num_variables();
        let sample = sample_from(&bqm, &bits);
        let mut flipped_sample = sample.clone();
        flipped_sample[flip] = bqm.vartype().flip(flipped_sample[flip]);
        let mut flipped = bqm.clone();
        flipped.flip_variable(&flip).unwrap();
        prop_assert!(
            (bqm.energy(&sample).unwrap() - flipped.energy(&flipped_sample).unwrap()).abs()
                < 1e-9
        );
    }

    fn arbitrary_bqm() -> impl Strategy<Value = BinaryQuadraticModel<usize>> {
        (
            prop_oneof![Just(Vartype::Spin), Just(Vartype::Binary)],
            proptest::collection::vec(-10.0..10.0_f64, 1..=6),
            proptest::collection::vec((0..6_usize, 0..6_usize, -10.0..10.0_f64), 0..12),
            -10.0..10.0_f64,
        )
            .prop_map(|(vartype, linear, quadratic, offset)| {
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
                bqm.add_offset(offset);
                bqm
            })
    }

    fn sample_from(bqm: &BinaryQuadraticModel<usize>, bits: &[bool]) -> Vec<i8> {
        let [lo, hi] = bqm.vartype().values();
        bits.iter()
            .take(bqm.num_variables())
            .map(|b| if *b { hi } else { lo })
            .collect()
    }
}
