//! MK/NK landscapes.
//!
//! A landscape is a pseudo-Boolean fitness function written as a sum of
//! subfunctions, each reading only a handful of bits through a full lookup
//! table. Landscapes are immutable once built and are shared read-only by the
//! enumeration engine.

mod parse;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::LoadError;

pub use parse::parse_landscape;

/// Fitness value of a candidate or of a single subfunction.
pub type Fitness = i64;

/// Largest number of variables a single subfunction may read.
///
/// Bounds the lookup table at 2^30 entries.
pub const MAX_SUBFUNCTION_ORDER: usize = 30;

/// Problem tag from the `p` line of a landscape description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProblemKind {
    /// Generic MK landscape.
    #[default]
    Mk,
    /// NK landscape.
    Nk,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Mk => write!(f, "MK"),
            ProblemKind::Nk => write!(f, "NK"),
        }
    }
}

/// One additive term of a landscape.
///
/// The table is indexed by reading the listed variables as a big-endian
/// binary number: the first variable is the most significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfunction {
    variables: Vec<usize>,
    values: Vec<Fitness>,
}

impl Subfunction {
    /// Creates a subfunction. Consistency with a landscape is checked by
    /// [`Landscape::new`].
    pub fn new(variables: Vec<usize>, values: Vec<Fitness>) -> Self {
        Self { variables, values }
    }

    /// Returns the variables in table order.
    #[inline]
    pub fn variables(&self) -> &[usize] {
        &self.variables
    }

    /// Returns the lookup table.
    #[inline]
    pub fn values(&self) -> &[Fitness] {
        &self.values
    }

    /// Returns the number of variables (k).
    #[inline]
    pub fn order(&self) -> usize {
        self.variables.len()
    }

    /// Returns this subfunction's contribution for a full candidate.
    #[inline]
    pub fn evaluate(&self, solution: &[bool]) -> Fitness {
        let index = self
            .variables
            .iter()
            .fold(0usize, |index, &bit| (index << 1) | usize::from(solution[bit]));
        self.values[index]
    }
}

/// An immutable MK landscape.
///
/// # Examples
///
/// ```
/// use hyperplane_core::{Landscape, ProblemKind, Subfunction};
///
/// let landscape = Landscape::new(
///     ProblemKind::Mk,
///     2,
///     vec![Subfunction::new(vec![0, 1], vec![0, 1, 1, 0])],
/// ).unwrap();
///
/// assert_eq!(landscape.fitness(&[false, true]), 1);
/// assert_eq!(landscape.fitness(&[true, true]), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landscape {
    kind: ProblemKind,
    length: usize,
    subfunctions: Vec<Subfunction>,
}

impl Landscape {
    /// Creates a landscape, validating every subfunction against `length`.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is zero, a subfunction reads more than
    /// [`MAX_SUBFUNCTION_ORDER`] variables, a table does not hold exactly
    /// 2^k values, or a variable index is not below `length`.
    pub fn new(
        kind: ProblemKind,
        length: usize,
        subfunctions: Vec<Subfunction>,
    ) -> Result<Self, LoadError> {
        if length == 0 {
            return Err(LoadError::MissingLength);
        }
        for (subfunction, sub) in subfunctions.iter().enumerate() {
            let order = sub.order();
            if order > MAX_SUBFUNCTION_ORDER {
                return Err(LoadError::TooManyVariables {
                    subfunction,
                    order,
                    max: MAX_SUBFUNCTION_ORDER,
                });
            }
            let expected = 1usize << order;
            if sub.values.len() != expected {
                return Err(LoadError::ValueCount {
                    subfunction,
                    expected,
                    found: sub.values.len(),
                });
            }
            if let Some(&index) = sub.variables.iter().find(|&&index| index >= length) {
                return Err(LoadError::IndexOutOfRange {
                    subfunction,
                    index,
                    length,
                });
            }
        }
        Ok(Self {
            kind,
            length,
            subfunctions,
        })
    }

    /// Loads a landscape from a file in the MK text format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        parse_landscape(BufReader::new(file))
    }

    /// Loads a landscape from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        parse_landscape(reader)
    }

    /// Returns the problem tag.
    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// Returns the bit-vector length N.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns every subfunction in load order.
    #[inline]
    pub fn subfunctions(&self) -> &[Subfunction] {
        &self.subfunctions
    }

    /// Returns the contribution of one subfunction for a full candidate.
    #[inline]
    pub fn evaluate(&self, subfunction: usize, solution: &[bool]) -> Fitness {
        self.subfunctions[subfunction].evaluate(solution)
    }

    /// Computes the full fitness of a candidate from scratch.
    pub fn fitness(&self, solution: &[bool]) -> Fitness {
        self.subfunctions
            .iter()
            .map(|sub| sub.evaluate(solution))
            .sum()
    }

    /// Counts, for every variable that shares a subfunction with another
    /// variable, how many distinct variables it interacts with.
    pub fn dependency_profile(&self) -> DependencyProfile {
        let mut related: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for sub in &self.subfunctions {
            for &a in sub.variables() {
                for &b in sub.variables() {
                    if a != b {
                        related.entry(a).or_default().insert(b);
                    }
                }
            }
        }
        DependencyProfile {
            counts: related
                .into_iter()
                .map(|(variable, others)| (variable, others.len()))
                .collect(),
        }
    }

    /// Writes the landscape in the MK text format.
    pub fn write_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "p {} {}", self.kind, self.length)?;
        for sub in &self.subfunctions {
            write!(out, "m")?;
            for variable in sub.variables() {
                write!(out, " {}", variable)?;
            }
            writeln!(out)?;
            let values: Vec<String> = sub.values().iter().map(|v| v.to_string()).collect();
            writeln!(out, "{}", values.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Landscape {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_landscape(s.as_bytes())
    }
}

/// Number of distinct interaction partners per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyProfile {
    /// Variable index to number of distinct co-occurring variables.
    pub counts: BTreeMap<usize, usize>,
}

impl DependencyProfile {
    /// Returns the mean number of partners, or `None` if no variable
    /// interacts with another.
    pub fn mean(&self) -> Option<f64> {
        if self.counts.is_empty() {
            return None;
        }
        let total: usize = self.counts.values().sum();
        Some(total as f64 / self.counts.len() as f64)
    }
}
