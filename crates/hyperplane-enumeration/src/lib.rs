//! Hyperplane Enumeration - exhaustive r-bit local optima enumeration
//!
//! This crate provides the enumeration engine:
//! - Interaction graph and connected move generation
//! - Move/subfunction cross-reference tables
//! - Incremental delta table with improving-move bins
//! - Bit reordering for early hyperplane elimination
//! - Hyperplane and Gray code traversals
//! - Sinks receiving every local optimum as it is found

pub mod delta;
pub mod engine;
pub mod graph;
pub mod moves;
pub mod remap;
pub mod sink;
pub mod statistics;
pub mod traversal;

pub use delta::DeltaTable;
pub use engine::{Enumeration, EnumerationOptions};
pub use graph::{k_order_subgraphs, InteractionGraph};
pub use moves::{Move, MoveSet};
pub use remap::Permutation;
pub use sink::{CollectingSink, LocalOptimum, OptimaSink, RunHeader, TextSink};
pub use statistics::EnumerationSummary;
pub use traversal::{GrayCounter, ProgressTracker};
