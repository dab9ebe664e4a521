//! License detection error types.

use thiserror::Error;

/// Errors that can occur while detecting or writing licenses.
#[derive(Debug, Error)]
pub enum LicenseError {
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
    #[error("Failed to serialize license results: {0}")]
    Json(#[from] serde_json::Error),
}
