//! Error types for hyperplane

use thiserror::Error;

/// Main error type for hyperplane operations
#[derive(Debug, Error)]
pub enum HyperplaneError {
    /// The landscape description could not be loaded
    #[error("Landscape error: {0}")]
    Load(#[from] LoadError),

    /// Error in run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing results failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine bookkeeping no longer matches the landscape
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Malformed landscape description.
///
/// Every variant is fatal: a landscape that fails to load is never handed to
/// the engine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read landscape: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing or zero bit-vector length")]
    MissingLength,

    #[error("line {line}: unknown problem type '{problem}' (expected MK or NK)")]
    UnknownProblem { line: usize, problem: String },

    #[error("line {line}: duplicate problem line")]
    DuplicateProblem { line: usize },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("subfunction {subfunction}: missing value line")]
    MissingValues { subfunction: usize },

    #[error("subfunction {subfunction}: expected {expected} values, found {found}")]
    ValueCount {
        subfunction: usize,
        expected: usize,
        found: usize,
    },

    #[error("subfunction {subfunction}: variable {index} out of range for length {length}")]
    IndexOutOfRange {
        subfunction: usize,
        index: usize,
        length: usize,
    },

    #[error("subfunction {subfunction}: {order} variables exceeds the maximum of {max}")]
    TooManyVariables {
        subfunction: usize,
        order: usize,
        max: usize,
    },
}

/// Result type alias for hyperplane operations
pub type Result<T> = std::result::Result<T, HyperplaneError>;
