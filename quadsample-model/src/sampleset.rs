use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2, Axis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BinaryQuadraticModel, ModelError, Variable, Vartype};

/// Absolute tolerance for energies considered equal
/// by [`SampleSet::lowest`].
pub const LOWEST_ATOL: f64 = 1e-8;

/// Order of samples kept by [`SampleSet::truncate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortBy {
    /// Ascending energy,
    /// ties in sample order.
    #[default]
    Energy,
    /// Sample order.
    Unsorted,
}

/// One row of a [`SampleSet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record<'a> {
    /// Value of each variable.
    pub sample: ArrayView1<'a, i8>,
    /// Energy of `sample`.
    pub energy: f64,
    /// Number of times `sample` occurred.
    pub num_occurrences: usize,
}

/// Samples returned by a sampler,
/// with their energies and occurrence counts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleSet<V> {
    variables: Vec<V>,
    samples: Array2<i8>,
    energies: Array1<f64>,
    num_occurrences: Array1<usize>,
    vartype: Vartype,
}

impl<V> SampleSet<V>
where
    V: Variable,
{
    /// Return a sample set without samples or variables.
    pub fn empty(vartype: Vartype) -> Self {
        Self {
            variables: Vec::new(),
            samples: Array2::zeros((0, 0)),
            energies: Array1::zeros(0),
            num_occurrences: Array1::zeros(0),
            vartype,
        }
    }

    /// Return a sample set with the given energies,
    /// each sample occurring once.
    ///
    /// Column `i` of `samples` holds values of `variables[i]`.
    pub fn from_samples(
        samples: Array2<i8>,
        variables: Vec<V>,
        vartype: Vartype,
        energies: Vec<f64>,
    ) -> Result<Self, ModelError> {
        if samples.ncols() != variables.len() {
            return Err(ModelError::SampleLength {
                expected: variables.len(),
                found: samples.ncols(),
            });
        }
        if energies.len() != samples.nrows() {
            return Err(ModelError::EnergyCount {
                expected: samples.nrows(),
                found: energies.len(),
            });
        }
        if let Some(&value) = samples.iter().find(|x| !vartype.contains(**x)) {
            return Err(ModelError::InvalidValue { value, vartype });
        }
        Ok(Self {
            num_occurrences: Array1::ones(samples.nrows()),
            energies: Array1::from(energies),
            samples,
            variables,
            vartype,
        })
    }

    /// Return a sample set with energies from `bqm`.
    ///
    /// `variables` labels the columns of `samples`
    /// and may be any ordering of the variables of `bqm`.
    pub fn from_samples_bqm(
        samples: Array2<i8>,
        variables: Vec<V>,
        bqm: &BinaryQuadraticModel<V>,
    ) -> Result<Self, ModelError> {
        if variables.len() != bqm.num_variables() {
            return Err(ModelError::SampleLength {
                expected: bqm.num_variables(),
                found: variables.len(),
            });
        }
        let columns = variables
            .iter()
            .map(|v| {
                bqm.index_of(v)
                    .ok_or_else(|| ModelError::UnknownVariable(format!("{v:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(column) = columns.iter().position(|c| !seen.insert(*c)) {
            return Err(ModelError::DuplicateVariable(format!(
                "{:?}",
                variables[column]
            )));
        }

        let energies = if columns.iter().enumerate().all(|(i, c)| i == *c) {
            bqm.energies(samples.view())?
        } else {
            if samples.ncols() != columns.len() {
                return Err(ModelError::SampleLength {
                    expected: columns.len(),
                    found: samples.ncols(),
                });
            }
            let mut ordered = Array2::zeros(samples.raw_dim());
            for (from, to) in columns.iter().enumerate() {
                ordered.column_mut(*to).assign(&samples.column(from));
            }
            bqm.energies(ordered.view())?
        };
        Self::from_samples(samples, variables, bqm.vartype(), energies.to_vec())
    }

    /// Return number of rows.
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    /// Return whether this sample set has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Return column labels.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    /// Return samples,
    /// one row per sample.
    pub fn samples(&self) -> ArrayView2<'_, i8> {
        self.samples.view()
    }

    /// Return energy of each row.
    pub fn energies(&self) -> ArrayView1<'_, f64> {
        self.energies.view()
    }

    /// Return occurrence count of each row.
    pub fn num_occurrences(&self) -> ArrayView1<'_, usize> {
        self.num_occurrences.view()
    }

    /// Return the domain of every variable.
    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    /// Return rows in order.
    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.samples
            .rows()
            .into_iter()
            .zip(self.energies.iter())
            .zip(self.num_occurrences.iter())
            .map(|((sample, energy), num_occurrences)| Record {
                sample,
                energy: *energy,
                num_occurrences: *num_occurrences,
            })
    }

    /// Return the row with lowest energy,
    /// earliest on ties.
    pub fn first(&self) -> Option<Record<'_>> {
        self.iter().min_by(|a, b| a.energy.total_cmp(&b.energy))
    }

    /// Return rows with energy within [`LOWEST_ATOL`] of the lowest.
    pub fn lowest(&self) -> Self {
        match self.first() {
            Some(first) => {
                let indices = self
                    .energies
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| (**e - first.energy).abs() <= LOWEST_ATOL)
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>();
                self.select(&indices)
            }
            None => self.clone(),
        }
    }

    /// Return indices of rows in ascending energy,
    /// ties in row order.
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut indices = (0..self.len()).collect::<Vec<_>>();
        indices.sort_by(|a, b| self.energies[*a].total_cmp(&self.energies[*b]));
        indices
    }

    /// Return at most `n` rows,
    /// chosen by `sorted_by`.
    pub fn truncate(&self, n: usize, sorted_by: SortBy) -> Self {
        let indices = match sorted_by {
            SortBy::Energy => self.sorted_indices().into_iter().take(n).collect::<Vec<_>>(),
            SortBy::Unsorted => (0..self.len().min(n)).collect(),
        };
        self.select(&indices)
    }

    /// Return this sample set
    /// with identical rows merged.
    ///
    /// Merged rows keep the position and energy
    /// of their first occurrence
    /// and sum occurrence counts.
    pub fn aggregate(&self) -> Self {
        let mut groups = IndexMap::<Vec<i8>, (usize, usize)>::new();
        for (row, record) in self.iter().enumerate() {
            groups
                .entry(record.sample.to_vec())
                .and_modify(|(_, n)| *n += record.num_occurrences)
                .or_insert((row, record.num_occurrences));
        }
        log::trace!("aggregated {} rows into {}", self.len(), groups.len());
        let indices = groups.values().map(|(row, _)| *row).collect::<Vec<_>>();
        let mut aggregated = self.select(&indices);
        aggregated.num_occurrences = groups.values().map(|(_, n)| *n).collect();
        aggregated
    }

    /// Return this sample set
    /// with values converted to `vartype`.
    ///
    /// Energies are unchanged.
    pub fn change_vartype(&self, vartype: Vartype) -> Self {
        let from = self.vartype;
        Self {
            samples: self.samples.mapv(|x| from.convert(x, vartype)),
            vartype,
            ..self.clone()
        }
    }

    /// Return this sample set
    /// with the values of `variables` flipped.
    ///
    /// Energies are unchanged,
    /// so callers must ensure they still describe the flipped samples.
    pub fn flip_variables<'a, I>(&self, variables: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a V>,
    {
        let mut flipped = self.clone();
        for v in variables {
            let column = self
                .variables
                .iter()
                .position(|x| x == v)
                .ok_or_else(|| ModelError::UnknownVariable(format!("{v:?}")))?;
            flipped
                .samples
                .column_mut(column)
                .mapv_inplace(|x| self.vartype.flip(x));
        }
        Ok(flipped)
    }

    /// Return rows of all `sets`, in order.
    ///
    /// Every set must have the same variables,
    /// in the same order,
    /// and the same vartype.
    pub fn concatenate<I>(sets: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = Self>,
    {
        let sets = sets.into_iter().collect::<Vec<_>>();
        let first = sets.first().ok_or(ModelError::NothingToConcatenate)?;
        for set in &sets[1..] {
            if set.variables != first.variables {
                return Err(ModelError::VariableMismatch);
            }
            if set.vartype != first.vartype {
                return Err(ModelError::VartypeMismatch {
                    expected: first.vartype,
                    found: set.vartype,
                });
            }
        }
        Ok(Self {
            samples: concatenate(
                Axis(0),
                &sets.iter().map(|s| s.samples.view()).collect::<Vec<_>>(),
            )?,
            energies: concatenate(
                Axis(0),
                &sets.iter().map(|s| s.energies.view()).collect::<Vec<_>>(),
            )?,
            num_occurrences: concatenate(
                Axis(0),
                &sets
                    .iter()
                    .map(|s| s.num_occurrences.view())
                    .collect::<Vec<_>>(),
            )?,
            variables: first.variables.clone(),
            vartype: first.vartype,
        })
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            variables: self.variables.clone(),
            samples: self.samples.select(Axis(0), indices),
            energies: self.energies.select(Axis(0), indices),
            num_occurrences: self.num_occurrences.select(Axis(0), indices),
            vartype: self.vartype,
        }
    }
}

impl<V> fmt::Display for SampleSet<V>
where
    V: Variable + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ENERGY: &str = "energy";
        const NUM_OCCURRENCES: &str = "num_oc.";

        let order = self.sorted_indices();
        let index_width = order.iter().map(|i| i.to_string().len()).max().unwrap_or(0);
        let labels = self
            .variables
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        let widths = labels.iter().map(|l| l.len().max(2)).collect::<Vec<_>>();
        let energies = order
            .iter()
            .map(|i| format!("{:?}", self.energies[*i]))
            .collect::<Vec<_>>();
        let energy_width = energies
            .iter()
            .map(String::len)
            .chain([ENERGY.len()])
            .max()
            .unwrap_or(0);

        write!(f, "{:index_width$}", "")?;
        for (label, &width) in labels.iter().zip(&widths) {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f, " {ENERGY:>energy_width$} {NUM_OCCURRENCES}")?;

        for (row, energy) in order.iter().zip(&energies) {
            write!(f, "{row:>index_width$}")?;
            for (column, &width) in widths.iter().enumerate() {
                let value = self.samples[[*row, column]];
                match self.vartype {
                    Vartype::Spin => write!(f, " {:>width$}", format!("{value:+}"))?,
                    Vartype::Binary => write!(f, " {value:>width$}")?,
                }
            }
            writeln!(
                f,
                " {energy:>energy_width$} {:>width$}",
                self.num_occurrences[*row],
                width = NUM_OCCURRENCES.len()
            )?;
        }

        write!(
            f,
            "['{}', {} rows, {} samples, {} variables]",
            self.vartype,
            self.len(),
            self.num_occurrences.sum(),
            self.num_variables()
        )
    }
}
