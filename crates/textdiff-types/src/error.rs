use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown cleanup mode: {0} (expected semantic, efficiency or none)")]
    UnknownCleanupMode(String),

    #[error("invalid section key: {0} (expected START:END)")]
    InvalidSectionKey(String),
}
