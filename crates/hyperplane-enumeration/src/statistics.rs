//! Enumeration run statistics.

use std::time::Duration;

/// Summary of one completed enumeration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnumerationSummary {
    /// Number of local optima reported.
    pub optima: u64,
    /// Number of states examined, the initial all-zero state included.
    pub visited: u64,
    /// Number of single-bit flips applied.
    pub flips: u64,
    /// Wall-clock time of move generation.
    pub setup: Duration,
    /// Move generation plus the traversal itself.
    pub elapsed: Duration,
}

impl EnumerationSummary {
    /// Returns the elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns the fraction of visited states that are local optima.
    pub fn optima_ratio(&self) -> f64 {
        if self.visited == 0 {
            0.0
        } else {
            self.optima as f64 / self.visited as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optima_ratio() {
        let summary = EnumerationSummary {
            optima: 4,
            visited: 16,
            ..Default::default()
        };
        assert!((summary.optima_ratio() - 0.25).abs() < 1e-12);
        assert_eq!(EnumerationSummary::default().optima_ratio(), 0.0);
    }

    #[test]
    fn test_elapsed_secs() {
        let summary = EnumerationSummary {
            elapsed: Duration::from_millis(1500),
            ..Default::default()
        };
        assert!((summary.elapsed_secs() - 1.5).abs() < 1e-12);
    }
}
