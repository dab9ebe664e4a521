//! Scenario extraction error types.

use thiserror::Error;

/// Errors that can occur while building the scenario index.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenarios directory does not exist.
    #[error("Scenarios directory not found: {path}")]
    MissingDirectory { path: String },

    /// File system error.
    #[error("Failed to access {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("Failed to serialize scenario index: {0}")]
    Json(#[from] serde_json::Error),
}
