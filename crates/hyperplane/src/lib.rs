//! Hyperplane - exhaustive local optima enumeration in Rust
//!
//! Load an MK/NK landscape, pick a radius and get every solution that no
//! flip of `radius` or fewer bits can improve.
//!
//! # Example
//!
//! ```rust
//! use hyperplane::prelude::*;
//!
//! let landscape: Landscape = "p MK 2\nm 0 1\n0 1 1 0\n".parse().unwrap();
//! let optima = hyperplane::local_optima(&landscape, 1).unwrap();
//!
//! let bits: Vec<String> = optima.iter().map(|o| o.bit_string()).collect();
//! assert_eq!(bits, vec!["01", "10"]);
//! ```

// Landscape model
pub use hyperplane_core::{
    parse_landscape, DependencyProfile, Fitness, HyperplaneError, Landscape, LoadError,
    ProblemKind, Result, Subfunction, MAX_SUBFUNCTION_ORDER,
};

// Configuration
pub use hyperplane_config::{ConfigError, EnumerationConfig, EnvironmentMode};

// Engine
pub use hyperplane_enumeration::{
    CollectingSink, Enumeration, EnumerationOptions, EnumerationSummary, LocalOptimum, Move,
    OptimaSink, RunHeader, TextSink,
};

#[cfg(feature = "console")]
pub use hyperplane_console as console;

mod runner;
pub use runner::{
    dependency_report, enumerate_with, local_optima, run_enumeration, DependencyReport,
};

pub mod prelude {
    pub use super::{
        CollectingSink, Enumeration, EnumerationConfig, EnumerationOptions, EnumerationSummary,
        Fitness, Landscape, LocalOptimum, OptimaSink, ProblemKind, Subfunction, TextSink,
    };
}
