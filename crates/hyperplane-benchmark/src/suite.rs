//! The standard benchmark sweep and file output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use hyperplane_core::Landscape;
use tracing::info;

use crate::generators::integer_sqrt;
use crate::{generate, Family, GenerateError};

/// One landscape of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkInstance {
    pub family: Family,
    pub length: usize,
    pub k: usize,
    pub seed: u64,
}

impl BenchmarkInstance {
    /// Returns the file name, `<Family>_N<length>_K<k>_S<seed>.txt`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_N{}_K{}_S{}.txt",
            self.family, self.length, self.k, self.seed
        )
    }

    /// Generates the landscape.
    pub fn generate(&self) -> Result<Landscape, GenerateError> {
        generate(self.family, self.length, self.k, self.seed)
    }
}

/// Lengths, seeds and per-family limits of a benchmark sweep.
///
/// The default sweep covers lengths 15 to 100 with 30 seeds each at every
/// family's default `k`. Trap lengths must be a multiple of `k`, spin glass
/// lengths a perfect square and MAX-kSAT stops at 50 bits. Thirty extra
/// 200-bit adjacent NKq landscapes are appended.
///
/// # Example
///
/// ```
/// use hyperplane_benchmark::{BenchmarkSuite, Family};
///
/// let suite = BenchmarkSuite::new().with_lengths(16..=16).with_seeds(2);
/// let names: Vec<String> = suite
///     .instances()
///     .iter()
///     .filter(|instance| instance.family == Family::IsingSpinGlass)
///     .map(|instance| instance.file_name())
///     .collect();
/// assert_eq!(names, vec!["IsingSpinGlass_N16_K2_S0.txt", "IsingSpinGlass_N16_K2_S1.txt"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSuite {
    lengths: RangeInclusive<usize>,
    seeds: u64,
    max_sat_length: usize,
    large_adjacent_length: Option<usize>,
}

impl Default for BenchmarkSuite {
    fn default() -> Self {
        Self {
            lengths: 15..=100,
            seeds: 30,
            max_sat_length: 50,
            large_adjacent_length: Some(200),
        }
    }
}

impl BenchmarkSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the swept lengths and drops the large adjacent NKq extras.
    pub fn with_lengths(mut self, lengths: RangeInclusive<usize>) -> Self {
        self.lengths = lengths;
        self.large_adjacent_length = None;
        self
    }

    /// Sets the number of seeds per length, starting at 0.
    pub fn with_seeds(mut self, seeds: u64) -> Self {
        self.seeds = seeds;
        self
    }

    /// Lists every instance in generation order.
    pub fn instances(&self) -> Vec<BenchmarkInstance> {
        let mut instances = Vec::new();
        for family in Family::ALL {
            let k = family.default_k();
            for length in self.lengths.clone() {
                if !self.accepts(family, length, k) {
                    continue;
                }
                for seed in 0..self.seeds {
                    instances.push(BenchmarkInstance {
                        family,
                        length,
                        k,
                        seed,
                    });
                }
            }
        }
        if let Some(length) = self.large_adjacent_length {
            let family = Family::AdjacentNkq;
            for seed in 0..self.seeds {
                instances.push(BenchmarkInstance {
                    family,
                    length,
                    k: family.default_k(),
                    seed,
                });
            }
        }
        instances
    }

    fn accepts(&self, family: Family, length: usize, k: usize) -> bool {
        match family {
            Family::DeceptiveTrap => length % k == 0,
            Family::IsingSpinGlass => {
                let side = integer_sqrt(length);
                side * side == length && side >= 3
            }
            Family::MaxSat => length <= self.max_sat_length,
            Family::AdjacentNkq | Family::RandomNkq => k < length,
        }
    }

    /// Writes every instance into `folder`, creating it if needed.
    ///
    /// Returns the paths written.
    pub fn write_all(&self, folder: impl AsRef<Path>) -> Result<Vec<PathBuf>, GenerateError> {
        let folder = folder.as_ref();
        fs::create_dir_all(folder)?;
        let instances = self.instances();
        let mut written = Vec::with_capacity(instances.len());
        for instance in &instances {
            let path = folder.join(instance.file_name());
            write_landscape(&instance.generate()?, &path)?;
            written.push(path);
        }
        info!(
            event = "suite_written",
            folder = %folder.display(),
            count = written.len() as u64,
        );
        Ok(written)
    }
}

/// Generates one landscape and writes it to `path`.
pub fn write_benchmark(
    family: Family,
    length: usize,
    k: usize,
    seed: u64,
    path: impl AsRef<Path>,
) -> Result<Landscape, GenerateError> {
    let landscape = generate(family, length, k, seed)?;
    write_landscape(&landscape, path.as_ref())?;
    Ok(landscape)
}

fn write_landscape(landscape: &Landscape, path: &Path) -> Result<(), GenerateError> {
    let mut out = BufWriter::new(File::create(path)?);
    landscape.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
