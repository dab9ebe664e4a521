//! Example verification error types.

use thiserror::Error;

/// Errors that can occur while verifying examples.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The scenarios directory does not exist.
    #[error("Scenarios directory not found: {path}")]
    MissingDirectory { path: String },

    /// File system error.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("Failed to serialize verification results: {0}")]
    Json(#[from] serde_json::Error),
}
