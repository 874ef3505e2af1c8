//! Generation errors.

use hyperplane_core::LoadError;
use thiserror::Error;

use crate::Family;

/// A landscape could not be generated or written.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Unknown family name.
    #[error("unknown problem family '{0}'")]
    UnknownFamily(String),

    /// The family cannot be built with the requested length and `k`.
    #[error("{family}: {reason}")]
    InvalidParameters { family: Family, reason: String },

    /// The generated subfunctions did not form a valid landscape.
    #[error("generated landscape is invalid: {0}")]
    Landscape(#[from] LoadError),

    #[error("failed to write landscape: {0}")]
    Io(#[from] std::io::Error),
}
