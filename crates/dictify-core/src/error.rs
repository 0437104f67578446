//! Error types for the boundary operations (file input, JSON output).
//!
//! Literal parsing itself never errors: unsupported members are dropped and
//! truncated structures are discarded. Only the edges can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur around an extraction.
#[derive(Error, Debug)]
pub enum DictifyError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extraction result could not be serialized as JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An extraction mode name other than `named` or `anonymous`.
    #[error("unknown extraction mode '{0}' (expected 'named' or 'anonymous')")]
    UnknownMode(String),
}

/// Convenience alias used throughout dictify-core.
pub type Result<T> = std::result::Result<T, DictifyError>;
