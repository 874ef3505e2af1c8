//! Benchmark landscapes for hyperplane.
//!
//! Seeded generators for the five standard problem families, plus the
//! benchmark suite that sweeps them over lengths and seeds.
//!
//! # Overview
//!
//! - [`Family`] - the problem families and their conventional `k`
//! - [`generate`] - one landscape from a family, length, `k` and seed
//! - [`write_benchmark`] - generate and write a landscape file
//! - [`BenchmarkSuite`] - every instance of the standard sweep
//!
//! Every generator is deterministic for a given seed.
//!
//! # Example
//!
//! ```
//! use hyperplane_benchmark::{generate, Family};
//!
//! let landscape = generate(Family::IsingSpinGlass, 16, 2, 0).unwrap();
//! assert_eq!(landscape.length(), 16);
//! // one coupling to the right and one below each spin
//! assert_eq!(landscape.subfunctions().len(), 32);
//! ```

mod error;
mod family;
pub mod generators;
mod suite;

pub use error::GenerateError;
pub use family::Family;
pub use generators::generate;
pub use suite::{write_benchmark, BenchmarkInstance, BenchmarkSuite};
