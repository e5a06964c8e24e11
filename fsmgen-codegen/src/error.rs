//! Codegen error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the emitters.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to create output file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
