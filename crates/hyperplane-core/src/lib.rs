//! Hyperplane Core - landscape model shared by every hyperplane crate
//!
//! This crate provides the fundamental data for enumeration:
//! - Subfunctions: variable lists plus lookup tables
//! - Landscapes: the additive decomposition of a pseudo-Boolean fitness function
//! - The line-oriented MK/NK text format (reader and writer)
//! - Error types shared by the loader and the engine

pub mod error;
pub mod landscape;

pub use error::{HyperplaneError, LoadError, Result};
pub use landscape::{
    parse_landscape, DependencyProfile, Fitness, Landscape, ProblemKind, Subfunction,
    MAX_SUBFUNCTION_ORDER,
};
