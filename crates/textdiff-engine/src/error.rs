//! Error types for the engine crate.

use std::path::PathBuf;

use textdiff_types::Side;

/// Errors that can occur while preparing or running a comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// One side failed to parse as JSON in JSON mode.
    #[error("failed to parse the {side} text as JSON: {message}")]
    JsonParse { side: Side, message: String },

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configuration file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    /// The side that failed to parse, for JSON errors.
    pub fn side(&self) -> Option<Side> {
        match self {
            CompareError::JsonParse { side, .. } => Some(*side),
            _ => None,
        }
    }
}

/// Convenience alias for engine results.
pub type CompareResult<T> = Result<T, CompareError>;
