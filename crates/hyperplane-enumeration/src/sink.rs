//! Destinations for reported local optima.
//!
//! The engine reports each optimum the moment it is found. [`TextSink`]
//! writes the line-oriented result format and flushes every line, so a run
//! killed partway leaves everything found so far on disk.
//! [`CollectingSink`] keeps optima in memory.

use std::io::{self, Write};

use hyperplane_core::Fitness;

use crate::statistics::EnumerationSummary;

/// Parameters of a run, announced before the first optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHeader {
    pub radius: usize,
    pub hyperplane_elimination: bool,
    pub reordering: bool,
    pub length: usize,
    pub moves: usize,
}

/// Receives the output of an enumeration run.
pub trait OptimaSink {
    /// Called once before the traversal starts.
    fn begin(&mut self, header: &RunHeader) -> io::Result<()>;

    /// Called for every local optimum. `solution` is in original bit order.
    fn optimum(&mut self, fitness: Fitness, solution: &[bool]) -> io::Result<()>;

    /// Called once after the traversal completes.
    fn finish(&mut self, summary: &EnumerationSummary) -> io::Result<()>;
}

/// Writes the text result format.
///
/// ```text
/// c Radius: 1 Hyperplanes: 1 Reordering: 1
/// 3 0100
/// Count: 1 Elapsed: 0.000012
/// ```
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    line: String,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line: String::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OptimaSink for TextSink<W> {
    fn begin(&mut self, header: &RunHeader) -> io::Result<()> {
        writeln!(
            self.out,
            "c Radius: {} Hyperplanes: {} Reordering: {}",
            header.radius,
            u8::from(header.hyperplane_elimination),
            u8::from(header.reordering)
        )?;
        self.out.flush()
    }

    fn optimum(&mut self, fitness: Fitness, solution: &[bool]) -> io::Result<()> {
        self.line.clear();
        self.line
            .extend(solution.iter().map(|&bit| if bit { '1' } else { '0' }));
        writeln!(self.out, "{} {}", fitness, self.line)?;
        self.out.flush()
    }

    fn finish(&mut self, summary: &EnumerationSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "Count: {} Elapsed: {}",
            summary.optima,
            summary.elapsed_secs()
        )?;
        self.out.flush()
    }
}

/// A reported local optimum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalOptimum {
    pub fitness: Fitness,
    pub solution: Vec<bool>,
}

impl LocalOptimum {
    /// Renders the solution as a 0/1 string in original bit order.
    pub fn bit_string(&self) -> String {
        self.solution
            .iter()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }
}

/// Keeps every optimum in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub header: Option<RunHeader>,
    pub optima: Vec<LocalOptimum>,
    pub summary: Option<EnumerationSummary>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the optima sorted by bit string.
    pub fn sorted(&self) -> Vec<LocalOptimum> {
        let mut optima = self.optima.clone();
        optima.sort_by(|a, b| a.solution.cmp(&b.solution));
        optima
    }
}

impl OptimaSink for CollectingSink {
    fn begin(&mut self, header: &RunHeader) -> io::Result<()> {
        self.header = Some(*header);
        self.optima.clear();
        self.summary = None;
        Ok(())
    }

    fn optimum(&mut self, fitness: Fitness, solution: &[bool]) -> io::Result<()> {
        self.optima.push(LocalOptimum {
            fitness,
            solution: solution.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self, summary: &EnumerationSummary) -> io::Result<()> {
        self.summary = Some(*summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn header() -> RunHeader {
        RunHeader {
            radius: 2,
            hyperplane_elimination: true,
            reordering: false,
            length: 3,
            moves: 5,
        }
    }

    #[test]
    fn test_text_sink_format() {
        let mut sink = TextSink::new(Vec::new());
        sink.begin(&header()).unwrap();
        sink.optimum(7, &[true, false, true]).unwrap();
        sink.optimum(-2, &[false, false, false]).unwrap();
        sink.finish(&EnumerationSummary {
            optima: 2,
            elapsed: Duration::from_millis(250),
            ..Default::default()
        })
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "c Radius: 2 Hyperplanes: 1 Reordering: 0",
                "7 101",
                "-2 000",
                "Count: 2 Elapsed: 0.25",
            ]
        );
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        sink.begin(&header()).unwrap();
        sink.optimum(1, &[true, true, false]).unwrap();
        sink.optimum(2, &[false, true, false]).unwrap();
        sink.finish(&EnumerationSummary::default()).unwrap();

        assert_eq!(sink.header, Some(header()));
        let sorted = sink.sorted();
        assert_eq!(sorted[0].bit_string(), "010");
        assert_eq!(sorted[1].bit_string(), "110");
        assert!(sink.summary.is_some());
    }

    #[test]
    fn test_collecting_sink_resets_on_begin() {
        let mut sink = CollectingSink::new();
        sink.begin(&header()).unwrap();
        sink.optimum(1, &[true]).unwrap();
        sink.begin(&header()).unwrap();
        assert!(sink.optima.is_empty());
    }
}
