//! Enumeration entry points that hide all internal wiring.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hyperplane_config::EnumerationConfig;
use hyperplane_core::{HyperplaneError, Landscape, Result};
use hyperplane_enumeration::{
    CollectingSink, Enumeration, EnumerationOptions, EnumerationSummary, LocalOptimum,
    OptimaSink, TextSink,
};
use tracing::debug;

/// Loads a landscape, enumerates its local optima and writes them to
/// `output` in the text result format.
///
/// Optima are flushed to `output` as they are found.
pub fn run_enumeration(
    config: &EnumerationConfig,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<EnumerationSummary> {
    validate(config)?;
    let landscape = Landscape::from_file(input.as_ref())?;
    let file = File::create(output.as_ref())?;
    let mut sink = TextSink::new(BufWriter::new(file));
    enumerate_with(&landscape, config, &mut sink)
}

/// Enumerates an already loaded landscape into any sink.
pub fn enumerate_with<S: OptimaSink + ?Sized>(
    landscape: &Landscape,
    config: &EnumerationConfig,
    sink: &mut S,
) -> Result<EnumerationSummary> {
    validate(config)?;
    let mut engine = Enumeration::new(landscape, config.radius)?;
    engine.enumerate(sink, EnumerationOptions::from(config))
}

/// Returns every `radius`-bit local optimum, sorted by bit string.
pub fn local_optima(landscape: &Landscape, radius: usize) -> Result<Vec<LocalOptimum>> {
    let mut sink = CollectingSink::new();
    let mut engine = Enumeration::new(landscape, radius)?;
    engine.enumerate(&mut sink, EnumerationOptions::default())?;
    Ok(sink.sorted())
}

fn validate(config: &EnumerationConfig) -> Result<()> {
    config
        .validate()
        .map_err(|err| HyperplaneError::Config(err.to_string()))
}

/// Mean number of interaction partners per variable for a set of landscapes.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyReport {
    /// Each landscape with its mean, `None` when no variable interacts.
    pub entries: Vec<(PathBuf, Option<f64>)>,
}

impl DependencyReport {
    /// Returns the average of the per-landscape means, skipping landscapes
    /// without interactions.
    pub fn total(&self) -> Option<f64> {
        let means: Vec<f64> = self.entries.iter().filter_map(|(_, mean)| *mean).collect();
        if means.is_empty() {
            None
        } else {
            Some(means.iter().sum::<f64>() / means.len() as f64)
        }
    }
}

/// Loads every landscape and computes its dependency profile.
pub fn dependency_report<P: AsRef<Path>>(paths: &[P]) -> Result<DependencyReport> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let mean = Landscape::from_file(path)?.dependency_profile().mean();
        debug!(event = "dependencies", path = %path.display(), mean = ?mean);
        entries.push((path.to_path_buf(), mean));
    }
    Ok(DependencyReport { entries })
}
